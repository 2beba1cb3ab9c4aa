//! Common types used across BtAssist components.

use serde::{Deserialize, Serialize};

/// Power state of the local wireless link controller.
///
/// Only the platform mutates this; the harness requests transitions and
/// observes the results through the notification feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioState {
    Off,
    TurningOn,
    On,
    TurningOff,
}

impl std::fmt::Display for RadioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::TurningOn => write!(f, "turning_on"),
            Self::On => write!(f, "on"),
            Self::TurningOff => write!(f, "turning_off"),
        }
    }
}

/// Pairing state of a remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondState {
    None,
    Bonding,
    Bonded,
}

/// Per-profile (e.g. audio) connection state of a remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

/// Audio-profile playing state. Observed and logged only; no test reacts to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayingState {
    NotPlaying,
    Playing,
}

/// Immutable snapshot of a remote device as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDevice {
    /// Stable hardware address.
    pub address: String,
    /// Advertised display name. May be absent or empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw device-class code.
    #[serde(default)]
    pub device_class: u16,
}

impl RemoteDevice {
    pub fn new(address: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            address: address.into(),
            name: name.map(String::from),
            device_class: 0,
        }
    }

    /// Exact, case-sensitive name match. A device without a name never matches.
    pub fn name_matches(&self, target: &str) -> bool {
        self.name.as_deref() == Some(target)
    }

    /// Display name for logs, falling back to the address.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.address,
        }
    }
}

/// Terminal outcome of a test run.
///
/// Starts `Pending` and transitions to `Success` or `Failure` exactly once;
/// any transition after the first is a no-op (see `TestRun::finalize`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TestOutcome {
    Pending,
    Success { reason: Option<String> },
    Failure { reason: Option<String> },
}

impl TestOutcome {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// `Some(true)`/`Some(false)` once finalized, `None` while pending.
    pub fn success(&self) -> Option<bool> {
        match self {
            Self::Pending => None,
            Self::Success { .. } => Some(true),
            Self::Failure { .. } => Some(false),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Success { reason } | Self::Failure { reason } => reason.as_deref(),
        }
    }
}

/// The scripted test operation a harness instance runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Open,
    Close,
    Discover,
    Pair,
    Unpair,
    Rename,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Discover => "discover",
            Self::Pair => "pair",
            Self::Unpair => "unpair",
            Self::Rename => "rename",
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TestKind {
    type Err = crate::errors::BtaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "discover" | "discovery" => Ok(Self::Discover),
            "pair" => Ok(Self::Pair),
            "unpair" => Ok(Self::Unpair),
            "rename" => Ok(Self::Rename),
            other => Err(crate::errors::BtaError::UnknownTest(other.to_string())),
        }
    }
}

/// The pairing attempt currently in flight: set after a pairing request has
/// been auto-confirmed, cleared by the next bond-state notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPairing {
    pub device: RemoteDevice,
    pub pin: String,
}
