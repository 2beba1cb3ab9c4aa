//! Pairing test: discover the target, create a bond, await the bond result.
//!
//! Inbound pairing requests raised along the way are auto-confirmed by the
//! dispatcher; a denied confirmation fails the run there, before any bond
//! notification is awaited.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;
use crate::types::RemoteDevice;

pub struct PairCase;

impl PairCase {
    /// Shared by entry and by a successful radio open: short-circuit when
    /// the target is already in the paired set, otherwise scan for it.
    fn check_bonded_or_discover(&self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if link.is_bonded(&run.target) {
            run.finalize(true, Some("already bonded"));
            return;
        }
        debug!(device = %run.target, "starting discovery for pairing target");
        link.start_discovery();
    }
}

impl TestCase for PairCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if link.is_enabled() {
            self.check_bonded_or_discover(link, run);
        } else {
            debug!("opening radio before pairing");
            link.enable();
        }
    }

    fn on_open(&mut self, link: &mut dyn LinkOps, run: &mut TestRun, success: bool) {
        if success {
            self.check_bonded_or_discover(link, run);
        } else {
            run.finalize(false, Some("open failed"));
        }
    }

    fn on_device_found(
        &mut self,
        link: &mut dyn LinkOps,
        run: &mut TestRun,
        device: &RemoteDevice,
    ) {
        if !link.create_bond(device) {
            run.finalize(false, Some("createBond failed"));
        } else {
            debug!(device = device.label(), "waiting for bond result");
        }
    }

    fn on_bonded(
        &mut self,
        _link: &mut dyn LinkOps,
        run: &mut TestRun,
        _device: &RemoteDevice,
        success: bool,
    ) {
        run.finalize(success, None);
    }

    fn on_discovery_exhausted(&mut self, _link: &mut dyn LinkOps, run: &mut TestRun) {
        run.finalize(false, None);
    }
}
