//! # tw-core
//!
//! Core domain models and ports for Tetherwatch.
//!
//! This crate contains pure domain logic without any infrastructure
//! dependencies: the device record and its lifecycle states, the property
//! snapshot handed to hosts, tracker configuration, and the port trait the
//! device-management transport is consumed through.

// Public module exports
pub mod config;
pub mod device;
pub mod events;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::TrackerConfig;
pub use device::{ConnectionStatus, DeviceId, DeviceProperties, DeviceRecord, PropertyKey};
pub use ports::{
    DeviceHandle, DeviceNotification, DeviceTransport, ServiceHandle, TransportError,
};
