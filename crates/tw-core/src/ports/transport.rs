//! Device-management transport port
//!
//! This port abstracts the low-level device-management capability (connect,
//! pairing, sessions, property lookup) behind a trait, allowing the tracker
//! to drive the handshake without depending on a concrete transport.
//!
//! Attach/detach notifications are pushed by the transport into an inbound
//! queue; the tracker drains the queue synchronously on each pump tick
//! rather than being called back from transport threads.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::errors::TransportError;

/// Opaque token for one attached device, understood only by the transport.
/// The owning `DeviceRecord` must not outlive the handle's validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceHandle(u64);

impl DeviceHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Opaque token for an auxiliary per-device service resource (relay
/// connection, socket, callback registration, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceHandle(u64);

impl ServiceHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Attach/detach transition reported by the transport.
#[derive(Debug, Clone)]
pub enum DeviceNotification {
    Attached(DeviceHandle),
    Detached(DeviceHandle),
}

/// Device-management transport capability.
///
/// Native strings cross this boundary as UTF-16 code units; transcoding to
/// UTF-8 is the tracker's job. `stop_session`, `disconnect` and
/// `close_service` are best-effort release primitives and never fail.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    // === Handshake operations ===

    /// Open the transport connection to the device.
    async fn connect(&self, device: &DeviceHandle) -> Result<(), TransportError>;

    /// Whether a trust relationship with this host already exists.
    async fn is_paired(&self, device: &DeviceHandle) -> Result<bool, TransportError>;

    /// Establish a trust relationship with the device.
    async fn pair(&self, device: &DeviceHandle) -> Result<(), TransportError>;

    /// Check that the existing pairing is still valid.
    async fn validate_pairing(&self, device: &DeviceHandle) -> Result<(), TransportError>;

    /// Open an authorized session on a connected, paired device.
    async fn start_session(&self, device: &DeviceHandle) -> Result<(), TransportError>;

    /// Close an open session.
    async fn stop_session(&self, device: &DeviceHandle);

    /// Drop the transport connection.
    async fn disconnect(&self, device: &DeviceHandle);

    // === Property operations ===

    /// Native value for a transport property key, `None` when the device
    /// has no value for it.
    async fn copy_value(
        &self,
        device: &DeviceHandle,
        key: &str,
    ) -> Result<Option<Vec<u16>>, TransportError>;

    /// Native unique device identifier.
    async fn copy_identifier(&self, device: &DeviceHandle) -> Result<Vec<u16>, TransportError>;

    // === Service resources ===

    /// Release an auxiliary service resource.
    async fn close_service(&self, service: &ServiceHandle);

    // === Notifications ===

    /// Subscribe to attach/detach notifications.
    ///
    /// Returns the receiving end of the inbound notification queue, drained
    /// by the tracker's pump loop in arrival order.
    async fn subscribe_notifications(
        &self,
    ) -> Result<mpsc::Receiver<DeviceNotification>, TransportError>;
}
