//! Discovery test: scan until the target device is observed.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;
use crate::types::RemoteDevice;

pub struct DiscoverCase;

impl TestCase for DiscoverCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if run.target.is_empty() {
            run.finalize(false, Some("device name not specified"));
            return;
        }
        if link.is_enabled() {
            debug!("radio already open, starting discovery");
            link.start_discovery();
        } else {
            debug!("opening radio before discovery");
            link.enable();
        }
    }

    // A failed open deliberately has no mapping here: the run stays pending
    // and the surrounding shell's watchdog owns the timeout.
    fn on_open(&mut self, link: &mut dyn LinkOps, _run: &mut TestRun, success: bool) {
        if success {
            debug!("radio opened, starting discovery");
            link.start_discovery();
        }
    }

    fn on_device_found(
        &mut self,
        _link: &mut dyn LinkOps,
        run: &mut TestRun,
        _device: &RemoteDevice,
    ) {
        run.finalize(true, None);
    }

    fn on_discovery_exhausted(&mut self, _link: &mut dyn LinkOps, run: &mut TestRun) {
        run.finalize(false, None);
    }
}
