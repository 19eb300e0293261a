//! Device domain models: identity, lifecycle status, property snapshot and
//! the per-device record.

pub mod properties;
pub mod record;
pub mod status;
pub mod value_objects;

pub use properties::{DeviceProperties, PropertyKey};
pub use record::{DeviceRecord, OwnedResources};
pub use status::ConnectionStatus;
pub use value_objects::DeviceId;
