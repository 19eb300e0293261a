//! Tracker event names.

/// Fired at most once per pump tick, on ticks where the device roster
/// changed. Carries no payload; hosts re-query `list_devices()` to learn the
/// new state.
pub const DEVICES_CHANGED: &str = "devicesChanged";
