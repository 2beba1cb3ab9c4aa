//! Notification script parsing.
//!
//! Scripted runs replay a platform feed from a JSONL file: one
//! [`Notification`] per line, blank lines and `#` comments skipped.

use std::path::Path;

use crate::errors::BtaError;
use crate::notify::Notification;

/// Parse one feed line (1-based line number for error reporting).
pub fn parse_line(line: &str, number: usize) -> Result<Option<Notification>, BtaError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| BtaError::BadFeedLine {
            line: number,
            source,
        })
}

/// Parse a whole script.
pub fn parse_script(content: &str) -> Result<Vec<Notification>, BtaError> {
    let mut notifications = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(n) = parse_line(line, idx + 1)? {
            notifications.push(n);
        }
    }
    Ok(notifications)
}

/// Read and parse a script file.
pub fn read_script(path: &Path) -> Result<Vec<Notification>, BtaError> {
    let content = std::fs::read_to_string(path).map_err(|source| BtaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&content)
}
