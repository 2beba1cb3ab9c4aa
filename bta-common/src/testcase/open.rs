//! Radio power-on test.

use tracing::debug;

use super::{TestCase, TestRun};
use crate::link::LinkOps;

pub struct OpenCase;

impl TestCase for OpenCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun) {
        if link.is_enabled() {
            run.finalize(true, Some("already open"));
            return;
        }
        if !link.enable() {
            run.finalize(false, Some("enable request rejected"));
            return;
        }
        debug!("waiting for radio to open");
    }

    fn on_open(&mut self, _link: &mut dyn LinkOps, run: &mut TestRun, success: bool) {
        run.finalize(success, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimLink;
    use crate::testcase::test_support::run;
    use crate::types::TestKind;

    #[test]
    fn already_on_radio_finishes_without_an_enable_request() {
        let mut link = SimLink::new().radio_on();
        let (mut state, _) = run(TestKind::Open, "");
        OpenCase.begin(&mut link, &mut state);
        assert_eq!(state.outcome().success(), Some(true));
        assert_eq!(state.outcome().reason(), Some("already open"));
        assert_eq!(link.issued_count("enable"), 0);
    }

    #[test]
    fn waits_for_the_open_result_after_requesting_enable() {
        let mut link = SimLink::new();
        let (mut state, _) = run(TestKind::Open, "");
        let mut case = OpenCase;
        case.begin(&mut link, &mut state);
        assert!(!state.is_finished());
        assert_eq!(link.issued_count("enable"), 1);

        case.on_open(&mut link, &mut state, true);
        assert_eq!(state.outcome().success(), Some(true));
    }

    #[test]
    fn rejected_enable_request_fails_immediately() {
        let mut link = SimLink::new().deny("enable");
        let (mut state, _) = run(TestKind::Open, "");
        OpenCase.begin(&mut link, &mut state);
        assert_eq!(state.outcome().success(), Some(false));
        assert_eq!(state.outcome().reason(), Some("enable request rejected"));
    }

    #[test]
    fn failed_open_notification_fails_the_run() {
        let mut link = SimLink::new();
        let (mut state, _) = run(TestKind::Open, "");
        let mut case = OpenCase;
        case.begin(&mut link, &mut state);
        case.on_open(&mut link, &mut state, false);
        assert_eq!(state.outcome().success(), Some(false));
    }
}
