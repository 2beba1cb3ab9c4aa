//! BtAssist configuration.
//!
//! TOML file with serde defaults; every field is optional so a missing or
//! empty file yields the defaults. Default location is
//! `~/.config/bta/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::BtaError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BtaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pairing: PairingConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Default target device name for name-scoped tests.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Default result file path.
    #[serde(default = "default_result_file")]
    pub result_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            device_name: default_device_name(),
            result_file: default_result_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// PIN applied by auto-confirmation.
    #[serde(default = "default_pin")]
    pub pin: String,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self { pin: default_pin() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Screen identity of the native pairing-confirmation dialog.
    #[serde(default = "default_dialog_screen")]
    pub dialog_screen: String,
    /// Resource id of the dialog's confirmation control.
    #[serde(default = "default_confirm_id")]
    pub confirm_id: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            dialog_screen: default_dialog_screen(),
            confirm_id: default_confirm_id(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_device_name() -> String {
    "test-bt".to_string()
}

fn default_result_file() -> String {
    "bluetooth.txt".to_string()
}

fn default_pin() -> String {
    "0000".to_string()
}

fn default_dialog_screen() -> String {
    crate::bot::PAIRING_DIALOG_SCREEN.to_string()
}

fn default_confirm_id() -> String {
    crate::bot::CONFIRM_CONTROL_ID.to_string()
}

impl BtaConfig {
    /// Default config file location, when a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bta").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location. A missing
    /// file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, BtaError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path).map_err(|source| BtaError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| BtaError::BadConfig { path, source })
    }
}
