//! Rename test: set the local adapter name.
//!
//! The rename itself is synchronous; the only asynchronous leg is opening
//! the radio first when it is off.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;

pub struct RenameCase {
    new_name: Option<String>,
}

impl RenameCase {
    pub fn new(new_name: Option<String>) -> Self {
        Self { new_name }
    }

    fn apply(&self, link: &mut dyn LinkOps, run: &mut TestRun, name: &str) {
        if link.set_local_name(name) {
            run.finalize(true, None);
        } else {
            run.finalize(false, Some("setLocalName request rejected"));
        }
    }
}

impl TestCase for RenameCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        let Some(name) = self.new_name.clone().filter(|n| !n.is_empty()) else {
            run.finalize(false, Some("name is empty"));
            return;
        };
        if link.is_enabled() {
            self.apply(link, run, &name);
            return;
        }
        // A rejected enable request leaves the run pending; the surrounding
        // shell's watchdog owns the timeout.
        if !link.enable() {
            return;
        }
        debug!("waiting for radio to open before rename");
    }

    fn on_open(&mut self, link: &mut dyn LinkOps, run: &mut TestRun, success: bool) {
        if !success {
            run.finalize(false, Some("open failed"));
            return;
        }
        let Some(name) = self.new_name.clone() else {
            return;
        };
        self.apply(link, run, &name);
    }
}
