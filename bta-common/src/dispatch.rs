//! The notification dispatcher: the single point where platform
//! notifications become semantic events.
//!
//! Delivery is serialized by the platform, so every reaction (test-case
//! hooks, registry updates, pairing auto-confirmation) runs synchronously
//! inside `dispatch` and no locking is needed.

use tracing::{debug, trace};

use crate::link::LinkOps;
use crate::notify::{self, BondEvent, Notification, ProfileEvent, RadioEvent};
use crate::report::ResultReporter;
use crate::testcase::{self, TestCase, TestRun};
use crate::types::{PendingPairing, TestKind, TestOutcome};

/// One test run wired to a link adapter and the active test-case strategy.
///
/// Construction runs the case's entry action synchronously; the harness is
/// then fed notifications until the run finalizes (or the feed ends with
/// the run still pending, which the surrounding shell's watchdog owns).
pub struct Harness<L: LinkOps> {
    link: L,
    run: TestRun,
    case: Box<dyn TestCase>,
}

impl<L: LinkOps> Harness<L> {
    pub fn new(
        kind: TestKind,
        target: impl Into<String>,
        rename_to: Option<String>,
        pin: impl Into<String>,
        mut link: L,
        reporter: Box<dyn ResultReporter>,
    ) -> Self {
        let mut run = TestRun::new(kind, target, pin, reporter);
        let mut case = testcase::case_for(kind, rename_to);
        case.begin(&mut link, &mut run);
        Self { link, run, case }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn run(&self) -> &TestRun {
        &self.run
    }

    pub fn outcome(&self) -> &TestOutcome {
        self.run.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    /// Decode one notification and route the resulting semantic event.
    ///
    /// Once the run is finalized the case must neither issue commands nor
    /// observe events, so late notifications are dropped here.
    pub fn dispatch(&mut self, notification: &Notification) {
        if self.run.is_finished() {
            trace!(event = notification.label(), "late notification ignored");
            return;
        }
        debug!(event = notification.label(), "received event");
        match notification {
            Notification::RadioStateChanged { prev, curr } => {
                match notify::decode_radio(*prev, *curr) {
                    Some(RadioEvent::Open { success }) => {
                        self.case.on_open(&mut self.link, &mut self.run, success);
                    }
                    Some(RadioEvent::Close { success }) => {
                        self.case.on_close(&mut self.link, &mut self.run, success);
                    }
                    None => trace!(%prev, %curr, "radio transition carries no event"),
                }
            }

            Notification::DiscoveryStarted => {
                self.run.registry.clear();
            }

            Notification::DiscoveryFinished => {
                if self.run.matched.is_none() {
                    self.case
                        .on_discovery_exhausted(&mut self.link, &mut self.run);
                }
            }

            Notification::DeviceFound { device } => {
                debug!(
                    device = device.label(),
                    class = device.device_class,
                    "device observed"
                );
                self.run.registry.record(device.clone());
                // Only the first match counts; later sightings of the same
                // name still land in the registry above.
                if self.run.matched.is_none() && device.name_matches(&self.run.target) {
                    debug!(device = device.label(), "matched target device");
                    self.link.cancel_discovery();
                    self.run.matched = Some(device.clone());
                    self.case
                        .on_device_found(&mut self.link, &mut self.run, device);
                }
            }

            Notification::PairingRequested { device } => {
                // This event is claimed exclusively; the platform's own
                // pairing UI never appears while a run is active.
                debug!(device = device.label(), "auto-confirming pairing request");
                let mut accepted = self.link.confirm_pairing(device, true);
                if accepted {
                    let pin = self.run.pin.clone();
                    accepted = self.link.set_pin(device, &pin);
                }
                if accepted {
                    debug!("waiting for bond state change");
                    self.run.pending_pairing = Some(PendingPairing {
                        device: device.clone(),
                        pin: self.run.pin.clone(),
                    });
                } else {
                    self.run.finalize(false, Some("permission denied"));
                }
            }

            Notification::BondStateChanged { device, prev, curr } => {
                match notify::decode_bond(*prev, *curr) {
                    Some(BondEvent::Bonded { success }) => {
                        self.run.pending_pairing = None;
                        self.case
                            .on_bonded(&mut self.link, &mut self.run, device, success);
                    }
                    Some(BondEvent::Unbound) => {
                        self.case.on_unbound(&mut self.link, &mut self.run, device);
                    }
                    None => trace!("bond transition carries no event"),
                }
            }

            Notification::ProfileConnectionChanged { device, prev, curr } => {
                match notify::decode_profile(*prev, *curr) {
                    Some(ProfileEvent::Connected { success }) => {
                        self.case
                            .on_connected(&mut self.link, &mut self.run, device, success);
                    }
                    Some(ProfileEvent::Disconnected { success }) => {
                        self.case
                            .on_disconnected(&mut self.link, &mut self.run, device, success);
                    }
                    None => trace!("profile transition carries no event"),
                }
            }

            Notification::ProfilePlayingChanged { prev, curr } => {
                // Logged only; no test reacts to audio playback state.
                debug!(?prev, ?curr, "audio playing state changed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use crate::sim::SimLink;
    use crate::types::{BondState, RadioState, RemoteDevice};

    fn harness(kind: TestKind, target: &str, link: SimLink) -> (Harness<SimLink>, RecordingReporter) {
        let recorder = RecordingReporter::new();
        let h = Harness::new(kind, target, None, "0000", link, Box::new(recorder.clone()));
        (h, recorder)
    }

    fn dev(name: &str) -> RemoteDevice {
        RemoteDevice::new("AA:BB:CC:DD:EE:FF", Some(name))
    }

    #[test]
    fn unlisted_radio_transitions_invoke_no_hook() {
        // An Off -> TurningOn edge is not a terminal transition; an open
        // test must stay pending.
        let (mut h, recorder) = harness(TestKind::Open, "", SimLink::new());
        h.dispatch(&Notification::RadioStateChanged {
            prev: RadioState::Off,
            curr: RadioState::TurningOn,
        });
        h.dispatch(&Notification::RadioStateChanged {
            prev: RadioState::On,
            curr: RadioState::TurningOff,
        });
        assert!(!h.is_finished());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn open_run_completes_on_the_terminal_transition() {
        let (mut h, recorder) = harness(TestKind::Open, "", SimLink::new());
        h.dispatch(&Notification::RadioStateChanged {
            prev: RadioState::TurningOn,
            curr: RadioState::On,
        });
        assert_eq!(h.outcome().success(), Some(true));
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn discovery_start_clears_the_registry() {
        let (mut h, _) = harness(TestKind::Discover, "test-bt", SimLink::new().radio_on());
        h.dispatch(&Notification::DeviceFound { device: dev("other") });
        assert_eq!(h.run().registry.len(), 1);
        h.dispatch(&Notification::DiscoveryStarted);
        assert!(h.run().registry.is_empty());
    }

    #[test]
    fn first_match_cancels_discovery_and_later_sightings_do_not_retrigger() {
        let (mut h, recorder) = harness(TestKind::Discover, "test-bt", SimLink::new().radio_on());
        h.dispatch(&Notification::DiscoveryStarted);
        h.dispatch(&Notification::DeviceFound { device: dev("other") });
        assert_eq!(h.link().issued_count("cancel_discovery"), 0);

        h.dispatch(&Notification::DeviceFound { device: dev("test-bt") });
        assert_eq!(h.link().issued_count("cancel_discovery"), 1);
        assert_eq!(h.outcome().success(), Some(true));
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn pairing_request_confirms_then_sets_the_pin() {
        let (mut h, _) = harness(TestKind::Pair, "test-bt", SimLink::new().radio_on());
        h.dispatch(&Notification::PairingRequested { device: dev("test-bt") });
        assert_eq!(h.link().issued_count("confirm_pairing"), 1);
        assert_eq!(h.link().issued_count("set_pin"), 1);
        assert!(h.run().pending_pairing.is_some());
        assert!(!h.is_finished());
    }

    #[test]
    fn denied_confirmation_fails_the_run_without_a_pin_attempt() {
        let link = SimLink::new().radio_on().deny("confirm_pairing");
        let (mut h, _) = harness(TestKind::Pair, "test-bt", link);
        h.dispatch(&Notification::PairingRequested { device: dev("test-bt") });
        assert_eq!(h.outcome().success(), Some(false));
        assert_eq!(h.outcome().reason(), Some("permission denied"));
        assert_eq!(h.link().issued_count("set_pin"), 0);
    }

    #[test]
    fn bond_result_clears_the_pending_pairing() {
        let (mut h, _) = harness(TestKind::Pair, "test-bt", SimLink::new().radio_on());
        h.dispatch(&Notification::PairingRequested { device: dev("test-bt") });
        assert!(h.run().pending_pairing.is_some());
        h.dispatch(&Notification::BondStateChanged {
            device: dev("test-bt"),
            prev: BondState::Bonding,
            curr: BondState::Bonded,
        });
        assert_eq!(h.outcome().success(), Some(true));
    }

    #[test]
    fn notifications_after_finalize_are_dropped() {
        let (mut h, recorder) = harness(TestKind::Open, "", SimLink::new().radio_on());
        assert!(h.is_finished());
        let issued_before = h.link().issued().len();
        h.dispatch(&Notification::RadioStateChanged {
            prev: RadioState::TurningOn,
            curr: RadioState::On,
        });
        h.dispatch(&Notification::DeviceFound { device: dev("test-bt") });
        assert_eq!(h.link().issued().len(), issued_before);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn playing_state_changes_are_log_only() {
        use crate::types::PlayingState;
        let (mut h, recorder) = harness(TestKind::Open, "", SimLink::new());
        h.dispatch(&Notification::ProfilePlayingChanged {
            prev: PlayingState::NotPlaying,
            curr: PlayingState::Playing,
        });
        assert!(!h.is_finished());
        assert_eq!(recorder.count(), 0);
    }
}
