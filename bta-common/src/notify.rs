//! Platform notification feed and the fixed transition decode tables.
//!
//! Notifications arrive serialized from the platform, one at a time, in
//! delivery order. Each decodes to zero or one semantic event; any
//! (prev, curr) pair outside the tables is ignored (logged by the caller).

use serde::{Deserialize, Serialize};

use crate::types::{BondState, PlayingState, ProfileState, RadioState, RemoteDevice};

/// An out-of-band state-change notification from the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    RadioStateChanged {
        prev: RadioState,
        curr: RadioState,
    },
    DiscoveryStarted,
    DiscoveryFinished,
    DeviceFound {
        device: RemoteDevice,
    },
    PairingRequested {
        device: RemoteDevice,
    },
    BondStateChanged {
        device: RemoteDevice,
        prev: BondState,
        curr: BondState,
    },
    ProfileConnectionChanged {
        device: RemoteDevice,
        prev: ProfileState,
        curr: ProfileState,
    },
    ProfilePlayingChanged {
        prev: PlayingState,
        curr: PlayingState,
    },
}

impl Notification {
    /// Short name for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RadioStateChanged { .. } => "radio_state_changed",
            Self::DiscoveryStarted => "discovery_started",
            Self::DiscoveryFinished => "discovery_finished",
            Self::DeviceFound { .. } => "device_found",
            Self::PairingRequested { .. } => "pairing_requested",
            Self::BondStateChanged { .. } => "bond_state_changed",
            Self::ProfileConnectionChanged { .. } => "profile_connection_changed",
            Self::ProfilePlayingChanged { .. } => "profile_playing_changed",
        }
    }
}

/// Semantic radio power event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    Open { success: bool },
    Close { success: bool },
}

/// Semantic bond event for one remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondEvent {
    Bonded { success: bool },
    Unbound,
}

/// Semantic profile-connection event for one remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileEvent {
    Connected { success: bool },
    Disconnected { success: bool },
}

/// Radio decode table. `TurningOn`/`TurningOff` resolve to the terminal
/// state they reached; everything else carries no meaning for a test.
pub fn decode_radio(prev: RadioState, curr: RadioState) -> Option<RadioEvent> {
    use RadioState::*;
    match (prev, curr) {
        (TurningOn, On) => Some(RadioEvent::Open { success: true }),
        (TurningOn, Off) => Some(RadioEvent::Open { success: false }),
        (TurningOff, Off) => Some(RadioEvent::Close { success: true }),
        (TurningOff, On) => Some(RadioEvent::Close { success: false }),
        _ => None,
    }
}

/// Bond decode table.
pub fn decode_bond(prev: BondState, curr: BondState) -> Option<BondEvent> {
    use BondState::*;
    match (prev, curr) {
        (Bonding, Bonded) => Some(BondEvent::Bonded { success: true }),
        (Bonding, None) => Some(BondEvent::Bonded { success: false }),
        (Bonded, None) => Some(BondEvent::Unbound),
        _ => Option::None,
    }
}

/// Profile-connection decode table.
pub fn decode_profile(prev: ProfileState, curr: ProfileState) -> Option<ProfileEvent> {
    use ProfileState::*;
    match (prev, curr) {
        (Connecting, Connected) => Some(ProfileEvent::Connected { success: true }),
        (Connecting, Disconnected) => Some(ProfileEvent::Connected { success: false }),
        (Disconnecting, Disconnected) => Some(ProfileEvent::Disconnected { success: true }),
        (Disconnecting, Connected) => Some(ProfileEvent::Disconnected { success: false }),
        _ => None,
    }
}
