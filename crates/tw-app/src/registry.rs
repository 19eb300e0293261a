//! Device registry: the single source of truth for what is currently
//! attached.

use std::collections::HashMap;

use tw_core::device::{DeviceProperties, DeviceRecord};
use tw_core::ports::DeviceHandle;
use tw_core::DeviceId;

/// Map from device identity to its live record.
///
/// An identity maps to at most one live record at any time; inserting a
/// record for an identity that is already tracked is rejected rather than
/// replacing the existing record.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceId, DeviceRecord>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// Inserts a record. Returns `false` if the identity is already tracked,
    /// leaving the existing record untouched.
    pub fn insert(&mut self, record: DeviceRecord) -> bool {
        if self.devices.contains_key(record.id()) {
            return false;
        }
        self.devices.insert(record.id().clone(), record);
        true
    }

    pub fn remove(&mut self, id: &DeviceId) -> Option<DeviceRecord> {
        self.devices.remove(id)
    }

    /// Removes the record that owns `handle`. Fallback lookup for detaches
    /// where the device vanished before its identifier could be read.
    pub fn remove_by_handle(&mut self, handle: &DeviceHandle) -> Option<DeviceRecord> {
        let id = self
            .devices
            .iter()
            .find(|(_, record)| record.handle() == Some(handle))
            .map(|(id, _)| id.clone())?;
        self.devices.remove(&id)
    }

    pub fn get(&self, id: &DeviceId) -> Option<&DeviceRecord> {
        self.devices.get(id)
    }

    pub fn get_mut(&mut self, id: &DeviceId) -> Option<&mut DeviceRecord> {
        self.devices.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Point-in-time snapshot of every record with an established session.
    /// Iteration order is unspecified; callers needing stable order must
    /// sort.
    pub fn snapshots(&self) -> Vec<DeviceProperties> {
        self.devices
            .values()
            .filter(|record| record.status().is_established())
            .map(|record| record.properties().clone())
            .collect()
    }

    /// Removes and returns every record, for shutdown teardown.
    pub fn drain(&mut self) -> Vec<DeviceRecord> {
        self.devices.drain().map(|(_, record)| record).collect()
    }
}
