//! Property extraction
//!
//! Reads identity fields from a device while its session is open and
//! transcodes the transport's native UTF-16 strings to UTF-8. Lookups fail
//! softly: a missing value or a failed call yields an absent field, never an
//! error and never an empty-string placeholder.

use tracing::debug;

use tw_core::device::{DeviceProperties, PropertyKey};
use tw_core::ports::{DeviceHandle, DeviceTransport};
use tw_core::DeviceId;

/// Transcodes native UTF-16 code units to an owned UTF-8 string.
///
/// The buffer is pre-allocated from the reported source length for the
/// worst-case expansion (three UTF-8 bytes per code unit), so the result is
/// never truncated. Invalid code units yield `None` rather than a lossy
/// replacement string.
pub fn decode_native(units: &[u16]) -> Option<String> {
    let mut out = String::with_capacity(units.len() * 3);
    for ch in char::decode_utf16(units.iter().copied()) {
        out.push(ch.ok()?);
    }
    Some(out)
}

/// Reads one property from a connected device. `None` when the transport has
/// no value for the key or the lookup fails.
pub async fn extract(
    transport: &dyn DeviceTransport,
    device: &DeviceHandle,
    key: PropertyKey,
) -> Option<String> {
    let units = transport
        .copy_value(device, key.transport_key())
        .await
        .ok()
        .flatten()?;
    decode_native(&units)
}

/// Populates the full property snapshot for a device. Must be called while
/// the session is open; fields the transport has no value for stay absent.
pub async fn populate(
    transport: &dyn DeviceTransport,
    device: &DeviceHandle,
    udid: &DeviceId,
) -> DeviceProperties {
    let mut properties = DeviceProperties::new(udid.as_str());
    for key in PropertyKey::ALL {
        if let Some(value) = extract(transport, device, key).await {
            properties.set(key, value);
        }
    }
    debug!(udid = %udid, "populated property snapshot");
    properties
}
