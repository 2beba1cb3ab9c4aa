//! Unpair test: remove the bond with the target and await the unbind event.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;
use crate::types::RemoteDevice;

pub struct UnpairCase;

impl UnpairCase {
    fn request_unbond(&self, link: &mut dyn LinkOps, run: &mut TestRun) {
        debug!(device = %run.target, "requesting bond removal");
        if !link.remove_bond_by_name(&run.target) {
            run.finalize(false, Some("removeBond request rejected"));
        } else {
            debug!("waiting for unpair");
        }
    }
}

impl TestCase for UnpairCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if !link.is_bonded(&run.target) {
            run.finalize(true, Some("already unpaired"));
            return;
        }
        if link.is_enabled() {
            self.request_unbond(link, run);
        } else {
            debug!("opening radio before unpair");
            link.enable();
        }
    }

    fn on_open(&mut self, link: &mut dyn LinkOps, run: &mut TestRun, success: bool) {
        if success {
            self.request_unbond(link, run);
        } else {
            run.finalize(false, Some("open failed"));
        }
    }

    fn on_unbound(&mut self, _link: &mut dyn LinkOps, run: &mut TestRun, device: &RemoteDevice) {
        if device.name_matches(&run.target) {
            run.finalize(true, None);
        } else {
            debug!(device = device.label(), "unbind for a different device ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimLink;
    use crate::testcase::test_support::run;
    use crate::types::TestKind;

    #[test]
    fn unpaired_target_finishes_without_a_remove_bond_request() {
        let mut link = SimLink::new().radio_on();
        let (mut state, _) = run(TestKind::Unpair, "test-bt");
        UnpairCase.begin(&mut link, &mut state);
        assert_eq!(state.outcome().success(), Some(true));
        assert_eq!(state.outcome().reason(), Some("already unpaired"));
        assert_eq!(link.issued_count("remove_bond"), 0);
    }

    #[test]
    fn bonded_target_gets_a_remove_bond_request() {
        let mut link = SimLink::new().radio_on().with_bonded("test-bt");
        let (mut state, _) = run(TestKind::Unpair, "test-bt");
        UnpairCase.begin(&mut link, &mut state);
        assert!(!state.is_finished());
        assert_eq!(link.issued_count("remove_bond"), 1);
    }

    #[test]
    fn closed_radio_is_opened_first() {
        let mut link = SimLink::new().with_bonded("test-bt");
        let (mut state, _) = run(TestKind::Unpair, "test-bt");
        let mut case = UnpairCase;
        case.begin(&mut link, &mut state);
        assert_eq!(link.issued_count("enable"), 1);
        assert_eq!(link.issued_count("remove_bond"), 0);

        case.on_open(&mut link, &mut state, true);
        assert_eq!(link.issued_count("remove_bond"), 1);
    }

    #[test]
    fn failed_open_fails_the_run() {
        let mut link = SimLink::new().with_bonded("test-bt");
        let (mut state, _) = run(TestKind::Unpair, "test-bt");
        let mut case = UnpairCase;
        case.begin(&mut link, &mut state);
        case.on_open(&mut link, &mut state, false);
        assert_eq!(state.outcome().success(), Some(false));
        assert_eq!(state.outcome().reason(), Some("open failed"));
    }

    #[test]
    fn only_the_target_unbind_finishes_the_run() {
        let mut link = SimLink::new().radio_on().with_bonded("test-bt");
        let (mut state, _) = run(TestKind::Unpair, "test-bt");
        let mut case = UnpairCase;
        case.begin(&mut link, &mut state);

        let other = RemoteDevice::new("11:22:33:44:55:66", Some("other"));
        case.on_unbound(&mut link, &mut state, &other);
        assert!(!state.is_finished());

        let target = RemoteDevice::new("AA:BB:CC:DD:EE:FF", Some("test-bt"));
        case.on_unbound(&mut link, &mut state, &target);
        assert_eq!(state.outcome().success(), Some(true));
    }
}
