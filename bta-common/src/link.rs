//! Privileged link-controller command surface.
//!
//! Every mutating call is fire-and-forget: the returned `bool` reflects only
//! whether the platform accepted the request, never the eventual outcome.
//! The outcome, when one exists, arrives later as a notification through the
//! serialized delivery path. Capability denials (hidden API unavailable,
//! security policy) are caught inside the adapter and surfaced as `false`.

use crate::types::{RadioState, RemoteDevice};

/// Capability-gated operations on the local link controller, plus the
/// synchronous directory queries the pair/unpair pre-checks rely on.
pub trait LinkOps {
    /// Current power state snapshot.
    fn radio_state(&self) -> RadioState;

    fn is_enabled(&self) -> bool {
        self.radio_state() == RadioState::On
    }

    /// Request radio power-on.
    fn enable(&mut self) -> bool;

    /// Request radio power-off.
    fn disable(&mut self) -> bool;

    /// Request a discovery session.
    fn start_discovery(&mut self) -> bool;

    /// Truncate the in-progress discovery session. No effect if discovery
    /// has already ended.
    fn cancel_discovery(&mut self) -> bool;

    /// Request creation of a bond with `device`.
    fn create_bond(&mut self, device: &RemoteDevice) -> bool;

    /// Request removal of the bond with `device`.
    fn remove_bond(&mut self, device: &RemoteDevice) -> bool;

    /// Confirm (or reject) an inbound pairing request.
    fn confirm_pairing(&mut self, device: &RemoteDevice, accept: bool) -> bool;

    /// Supply the pairing PIN.
    fn set_pin(&mut self, device: &RemoteDevice, pin: &str) -> bool;

    /// Rename the local adapter. Synchronous; no corresponding notification.
    fn set_local_name(&mut self, name: &str) -> bool;

    /// Whether a device with exactly this name is in the paired-device set.
    fn is_bonded(&self, name: &str) -> bool;

    /// Remove the bond with the first paired device of exactly this name.
    /// Returns true when no such device exists, mirroring the idempotent
    /// directory semantics of the platform call.
    fn remove_bond_by_name(&mut self, name: &str) -> bool;
}
