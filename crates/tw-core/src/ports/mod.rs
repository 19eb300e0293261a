//! Ports consumed by the tracker.

pub mod errors;
pub mod transport;

pub use errors::TransportError;
pub use transport::{DeviceHandle, DeviceNotification, DeviceTransport, ServiceHandle};
