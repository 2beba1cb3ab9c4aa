//! Run outcome reporting.
//!
//! A harness delivers exactly one report per run, from the single finalize
//! transition. Reporters are trait objects so the surrounding shell decides
//! where outcomes land (result file, log, test recorder).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::types::TestKind;

/// Terminal outcome of one harness run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub test: TestKind,
    pub success: bool,
    pub reason: Option<String>,
    pub finished_at: DateTime<Utc>,
}

/// Receives the (success, reason) pair exactly once per run.
pub trait ResultReporter {
    fn report(&mut self, report: &RunReport);
}

/// Writes the plain result-file format: test name on the first line,
/// `1`/`0` on the second, the reason on the third when present. Any
/// pre-existing file is truncated. With `json` set, writes the full
/// [`RunReport`] as JSON instead.
pub struct FileReporter {
    path: PathBuf,
    json: bool,
}

impl FileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            json: false,
        }
    }

    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, report: &RunReport) -> std::io::Result<()> {
        let mut file = std::fs::File::create(&self.path)?;
        if self.json {
            let body = serde_json::to_string_pretty(report)
                .map_err(std::io::Error::other)?;
            writeln!(file, "{body}")?;
        } else {
            writeln!(file, "{}", report.test)?;
            writeln!(file, "{}", if report.success { "1" } else { "0" })?;
            if let Some(reason) = report.reason.as_deref() {
                writeln!(file, "{reason}")?;
            }
        }
        Ok(())
    }
}

impl ResultReporter for FileReporter {
    fn report(&mut self, report: &RunReport) {
        if let Err(err) = self.write(report) {
            error!(path = %self.path.display(), %err, "failed to write result file");
        }
    }
}

/// Logs the outcome; used when no result file was requested.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ResultReporter for LogReporter {
    fn report(&mut self, report: &RunReport) {
        info!(
            run_id = %report.run_id,
            test = %report.test,
            success = report.success,
            reason = report.reason.as_deref().unwrap_or(""),
            "test finished"
        );
    }
}

/// Shared in-memory recorder for tests and composite reporting.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    records: Arc<Mutex<Vec<RunReport>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle observing the same record list; clone freely.
    pub fn records(&self) -> Vec<RunReport> {
        self.records.lock().expect("reporter lock poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().expect("reporter lock poisoned").len()
    }
}

impl ResultReporter for RecordingReporter {
    fn report(&mut self, report: &RunReport) {
        self.records
            .lock()
            .expect("reporter lock poisoned")
            .push(report.clone());
    }
}
