//! Background pairing automation and foreground/background ownership.
//!
//! Exactly one of {foreground harness, background watcher} owns
//! pairing-request notifications at any instant. Ownership is toggled by
//! explicit bind/unbind calls from the surrounding shell, not by locks:
//! binding a foreground consumer unregisters the watcher, unbinding
//! registers it again so unattended pairing keeps auto-confirming.

use tracing::{debug, info};

use crate::link::LinkOps;
use crate::notify::Notification;

/// Which side currently owns pairing-request notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingOwner {
    Foreground,
    Background,
}

/// Auto-confirms inbound pairing requests while registered. Unlike the
/// foreground path there is no test to report to, so a denied privileged
/// call is a logged no-op.
#[derive(Debug)]
pub struct PassivePairingWatcher {
    pin: String,
    registered: bool,
}

impl PassivePairingWatcher {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            registered: false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    fn register(&mut self) {
        if !self.registered {
            info!("passive pairing watcher registered");
            self.registered = true;
        }
    }

    fn unregister(&mut self) {
        if self.registered {
            info!("passive pairing watcher unregistered");
            self.registered = false;
        }
    }

    /// Feed one notification. Everything except a pairing request while
    /// registered is ignored.
    pub fn handle(&mut self, link: &mut dyn LinkOps, notification: &Notification) {
        if !self.registered {
            return;
        }
        let Notification::PairingRequested { device } = notification else {
            return;
        };
        debug!(device = device.label(), "auto-confirming unattended pairing");
        let mut accepted = link.confirm_pairing(device, true);
        if accepted {
            accepted = link.set_pin(device, &self.pin);
        }
        if !accepted {
            debug!(device = device.label(), "pairing confirmation denied, ignoring");
        }
    }
}

/// Lifecycle shell around the watcher, mirroring the hosting process's
/// bind/unbind callbacks. Starts in background ownership so there is never
/// an instant with no owner.
#[derive(Debug)]
pub struct ServiceHost {
    watcher: PassivePairingWatcher,
    owner: PairingOwner,
}

impl ServiceHost {
    pub fn new(pin: impl Into<String>) -> Self {
        let mut watcher = PassivePairingWatcher::new(pin);
        watcher.register();
        Self {
            watcher,
            owner: PairingOwner::Background,
        }
    }

    pub fn owner(&self) -> PairingOwner {
        self.owner
    }

    pub fn watcher(&self) -> &PassivePairingWatcher {
        &self.watcher
    }

    /// A foreground consumer attached: it owns pairing events exclusively.
    pub fn bind(&mut self) {
        self.watcher.unregister();
        self.owner = PairingOwner::Foreground;
    }

    /// The foreground consumer detached: unattended pairing resumes.
    pub fn unbind(&mut self) {
        self.watcher.register();
        self.owner = PairingOwner::Background;
    }

    /// Route a notification to the watcher (a no-op while foreground-bound).
    pub fn handle(&mut self, link: &mut dyn LinkOps, notification: &Notification) {
        self.watcher.handle(link, notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimLink;
    use crate::types::RemoteDevice;

    fn pairing_request() -> Notification {
        Notification::PairingRequested {
            device: RemoteDevice::new("AA:BB:CC:DD:EE:FF", Some("test-bt")),
        }
    }

    #[test]
    fn ownership_is_always_exactly_one_side() {
        let mut host = ServiceHost::new("0000");
        // Steady state before any bind: background owns.
        assert_eq!(host.owner(), PairingOwner::Background);
        assert!(host.watcher().is_registered());

        host.bind();
        assert_eq!(host.owner(), PairingOwner::Foreground);
        assert!(!host.watcher().is_registered());

        host.unbind();
        assert_eq!(host.owner(), PairingOwner::Background);
        assert!(host.watcher().is_registered());

        // Repeated toggles stay consistent.
        host.bind();
        host.bind();
        assert!(!host.watcher().is_registered());
        host.unbind();
        host.unbind();
        assert!(host.watcher().is_registered());
    }

    #[test]
    fn registered_watcher_confirms_and_sets_the_pin() {
        let mut host = ServiceHost::new("0000");
        let mut link = SimLink::new().radio_on();
        host.handle(&mut link, &pairing_request());
        assert_eq!(link.issued_count("confirm_pairing"), 1);
        assert_eq!(link.issued_count("set_pin"), 1);
    }

    #[test]
    fn bound_host_ignores_pairing_requests() {
        let mut host = ServiceHost::new("0000");
        host.bind();
        let mut link = SimLink::new().radio_on();
        host.handle(&mut link, &pairing_request());
        assert_eq!(link.issued_count("confirm_pairing"), 0);
    }

    #[test]
    fn denied_confirmation_is_a_silent_no_op() {
        let mut host = ServiceHost::new("0000");
        let mut link = SimLink::new().radio_on().deny("confirm_pairing");
        host.handle(&mut link, &pairing_request());
        assert_eq!(link.issued_count("set_pin"), 0);
        // No outcome to fail; the watcher just moves on.
        host.handle(&mut link, &pairing_request());
        assert_eq!(link.issued_count("confirm_pairing"), 2);
    }

    #[test]
    fn non_pairing_notifications_are_ignored() {
        let mut host = ServiceHost::new("0000");
        let mut link = SimLink::new();
        host.handle(&mut link, &Notification::DiscoveryStarted);
        host.handle(&mut link, &Notification::DiscoveryFinished);
        assert!(link.issued().is_empty());
    }
}
