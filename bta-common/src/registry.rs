//! Per-discovery-session device list.

use crate::types::RemoteDevice;

/// Transient, most-recently-observed-first list of devices seen during the
/// current discovery session. Insertion order is the only guarantee: no
/// dedup is performed, so a device rediscovered during the same scan
/// appears twice. Cleared whenever a discovery session starts.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<RemoteDevice>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation, newest first.
    pub fn record(&mut self, device: RemoteDevice) {
        self.devices.insert(0, device);
    }

    pub fn clear(&mut self) {
        self.devices.clear();
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteDevice> {
        self.devices.iter()
    }
}
