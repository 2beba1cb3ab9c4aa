//! Radio power-off test.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;

pub struct CloseCase;

impl TestCase for CloseCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if !link.is_enabled() {
            run.finalize(true, Some("already closed"));
            return;
        }
        if !link.disable() {
            run.finalize(false, Some("disable request rejected"));
            return;
        }
        debug!("waiting for radio to close");
    }

    fn on_close(&mut self, _link: &mut dyn LinkOps, run: &mut TestRun, success: bool) {
        run.finalize(success, None);
    }
}
