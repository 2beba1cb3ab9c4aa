//! Simulated link controller for scripted runs and tests.
//!
//! `SimLink` never touches radio hardware: it records every issued command,
//! answers each with a configurable accept/deny verdict, and keeps its
//! snapshot queries (radio state, paired set) consistent with the replayed
//! notification feed via [`SimLink::observe`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::link::LinkOps;
use crate::notify::Notification;
use crate::types::{BondState, RadioState, RemoteDevice};

/// A privileged command as issued through [`LinkOps`], captured for
/// later assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enable,
    Disable,
    StartDiscovery,
    CancelDiscovery,
    CreateBond { address: String },
    RemoveBond { address: String },
    ConfirmPairing { address: String, accept: bool },
    SetPin { address: String, pin: String },
    SetLocalName { name: String },
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::StartDiscovery => "start_discovery",
            Self::CancelDiscovery => "cancel_discovery",
            Self::CreateBond { .. } => "create_bond",
            Self::RemoveBond { .. } => "remove_bond",
            Self::ConfirmPairing { .. } => "confirm_pairing",
            Self::SetPin { .. } => "set_pin",
            Self::SetLocalName { .. } => "set_local_name",
        }
    }
}

/// Scriptable in-process [`LinkOps`] adapter.
#[derive(Debug, Clone)]
pub struct SimLink {
    radio: RadioState,
    bonded: BTreeSet<String>,
    local_name: String,
    denied: BTreeSet<&'static str>,
    issued: Vec<Command>,
}

impl Default for SimLink {
    fn default() -> Self {
        Self::new()
    }
}

impl SimLink {
    pub fn new() -> Self {
        Self {
            radio: RadioState::Off,
            bonded: BTreeSet::new(),
            local_name: String::new(),
            denied: BTreeSet::new(),
            issued: Vec::new(),
        }
    }

    /// Start with the radio already powered on.
    pub fn radio_on(mut self) -> Self {
        self.radio = RadioState::On;
        self
    }

    /// Seed the paired-device set with a named device.
    pub fn with_bonded(mut self, name: impl Into<String>) -> Self {
        self.bonded.insert(name.into());
        self
    }

    /// Deny requests for the named command ("enable", "set_pin", ...).
    pub fn deny(mut self, command: &'static str) -> Self {
        self.denied.insert(command);
        self
    }

    /// Commands issued so far, in order.
    pub fn issued(&self) -> &[Command] {
        &self.issued
    }

    pub fn issued_count(&self, label: &str) -> usize {
        self.issued.iter().filter(|c| c.label() == label).count()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Fold a replayed notification into the simulated platform state so
    /// that snapshot queries stay consistent with the feed.
    pub fn observe(&mut self, notification: &Notification) {
        match notification {
            Notification::RadioStateChanged { curr, .. } => {
                self.radio = *curr;
            }
            Notification::BondStateChanged { device, curr, .. } => {
                if let Some(name) = device.name.as_deref() {
                    match curr {
                        BondState::Bonded => {
                            self.bonded.insert(name.to_string());
                        }
                        BondState::None => {
                            self.bonded.remove(name);
                        }
                        BondState::Bonding => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn request(&mut self, command: Command) -> bool {
        let accepted = !self.denied.contains(command.label());
        if !accepted {
            debug!(command = command.label(), "request denied by platform");
        }
        self.issued.push(command);
        accepted
    }
}

impl LinkOps for SimLink {
    fn radio_state(&self) -> RadioState {
        self.radio
    }

    fn enable(&mut self) -> bool {
        self.request(Command::Enable)
    }

    fn disable(&mut self) -> bool {
        self.request(Command::Disable)
    }

    fn start_discovery(&mut self) -> bool {
        self.request(Command::StartDiscovery)
    }

    fn cancel_discovery(&mut self) -> bool {
        self.request(Command::CancelDiscovery)
    }

    fn create_bond(&mut self, device: &RemoteDevice) -> bool {
        self.request(Command::CreateBond {
            address: device.address.clone(),
        })
    }

    fn remove_bond(&mut self, device: &RemoteDevice) -> bool {
        self.request(Command::RemoveBond {
            address: device.address.clone(),
        })
    }

    fn confirm_pairing(&mut self, device: &RemoteDevice, accept: bool) -> bool {
        self.request(Command::ConfirmPairing {
            address: device.address.clone(),
            accept,
        })
    }

    fn set_pin(&mut self, device: &RemoteDevice, pin: &str) -> bool {
        self.request(Command::SetPin {
            address: device.address.clone(),
            pin: pin.to_string(),
        })
    }

    fn set_local_name(&mut self, name: &str) -> bool {
        let accepted = self.request(Command::SetLocalName {
            name: name.to_string(),
        });
        if accepted {
            self.local_name = name.to_string();
        }
        accepted
    }

    fn is_bonded(&self, name: &str) -> bool {
        self.bonded.contains(name)
    }

    fn remove_bond_by_name(&mut self, name: &str) -> bool {
        if self.bonded.contains(name) {
            let device = RemoteDevice::new(format!("sim:{name}"), Some(name));
            self.remove_bond(&device)
        } else {
            true
        }
    }
}
