//! Tetherwatch application orchestration layer.
//!
//! This crate drives the device discovery and session-negotiation flow: the
//! registry of attached devices, the session negotiator, the event bridge
//! and the cooperative pump loop, all owned by a [`DeviceTracker`] context
//! object.

pub mod bridge;
pub mod extractor;
pub mod negotiator;
pub mod registry;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use bridge::{EventBridge, Listener};
pub use negotiator::SessionNegotiator;
pub use registry::DeviceRegistry;
pub use tracker::{DeviceTracker, TrackerError};
