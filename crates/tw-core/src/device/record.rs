use chrono::{DateTime, Utc};

use super::{ConnectionStatus, DeviceId, DeviceProperties};
use crate::ports::{DeviceHandle, ServiceHandle};

/// Per-device state container that lives while the device is tracked.
///
/// Owns the transport handle and any auxiliary service resources opened on
/// the device's behalf. The snapshot is fully populated by the time the
/// record is created and is never re-populated while the record lives.
#[derive(Debug)]
pub struct DeviceRecord {
    id: DeviceId,
    status: ConnectionStatus,
    properties: DeviceProperties,
    handle: Option<DeviceHandle>,
    services: Vec<ServiceHandle>,
    attached_at: DateTime<Utc>,
}

/// Resources pulled out of a record when it is torn down. The application
/// layer releases them through the transport.
#[derive(Debug)]
pub struct OwnedResources {
    pub handle: DeviceHandle,
    pub services: Vec<ServiceHandle>,
}

impl DeviceRecord {
    /// Creates a record for a freshly announced device. Negotiation has not
    /// run yet, so the snapshot holds only the identity.
    pub fn discovered(id: DeviceId, handle: DeviceHandle) -> Self {
        let properties = DeviceProperties::new(id.as_str());
        Self {
            id,
            status: ConnectionStatus::default(),
            properties,
            handle: Some(handle),
            services: Vec::new(),
            attached_at: Utc::now(),
        }
    }

    /// Promotes a discovered record once session negotiation succeeds,
    /// installing the populated snapshot. Returns `false` and leaves the
    /// record untouched when it is already past `Discovered`.
    pub fn establish(&mut self, properties: DeviceProperties) -> bool {
        match self.status.on_established() {
            Some(next) => {
                self.status = next;
                self.properties = properties;
                true
            }
            None => false,
        }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn properties(&self) -> &DeviceProperties {
        &self.properties
    }

    pub fn handle(&self) -> Option<&DeviceHandle> {
        self.handle.as_ref()
    }

    pub fn attached_at(&self) -> DateTime<Utc> {
        self.attached_at
    }

    /// Hands an auxiliary service resource (e.g. a syslog relay connection)
    /// to this record for lifecycle ownership. It will be released on
    /// teardown whether or not the owning service was ever activated.
    pub fn own_service(&mut self, service: ServiceHandle) {
        self.services.push(service);
    }

    /// Transitions the record to `TornDown` and transfers out every owned
    /// resource for release. Returns `None` if the record was already torn
    /// down, so a second teardown is a safe no-op.
    pub fn begin_teardown(&mut self) -> Option<OwnedResources> {
        let handle = self.handle.take()?;
        self.status = self.status.on_teardown();
        Some(OwnedResources {
            handle,
            services: std::mem::take(&mut self.services),
        })
    }
}
