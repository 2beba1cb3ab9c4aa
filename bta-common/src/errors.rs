//! Library error definitions.
//!
//! Platform-call denials are deliberately not represented here: privileged
//! requests surface as request-accepted booleans at the `LinkOps` boundary
//! and test logic branches on those, never on raw errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BtaError {
    #[error("unknown test kind \"{0}\"")]
    UnknownTest(String),

    #[error("invalid notification on line {line}: {source}")]
    BadFeedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    BadConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
