//! Shared fixtures for the harness integration tests.

use bta_common::notify::Notification;
use bta_common::types::{BondState, RadioState, RemoteDevice};

pub fn device(name: &str) -> RemoteDevice {
    let octet = name.len() as u8;
    RemoteDevice::new(format!("AA:BB:CC:DD:EE:{octet:02X}"), Some(name))
}

pub fn radio(prev: RadioState, curr: RadioState) -> Notification {
    Notification::RadioStateChanged { prev, curr }
}

pub fn found(name: &str) -> Notification {
    Notification::DeviceFound {
        device: device(name),
    }
}

pub fn bond(name: &str, prev: BondState, curr: BondState) -> Notification {
    Notification::BondStateChanged {
        device: device(name),
        prev,
        curr,
    }
}

pub fn pairing_request(name: &str) -> Notification {
    Notification::PairingRequested {
        device: device(name),
    }
}
