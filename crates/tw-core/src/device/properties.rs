use serde::{Deserialize, Serialize};

/// The fixed set of identity fields read from a device while its session is
/// open, in snapshot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Name,
    DeviceClass,
    DeviceColor,
    ModelNumber,
    ProductVersion,
    SerialNumber,
    Imei,
    Meid,
}

impl PropertyKey {
    pub const ALL: [PropertyKey; 8] = [
        PropertyKey::Name,
        PropertyKey::DeviceClass,
        PropertyKey::DeviceColor,
        PropertyKey::ModelNumber,
        PropertyKey::ProductVersion,
        PropertyKey::SerialNumber,
        PropertyKey::Imei,
        PropertyKey::Meid,
    ];

    /// Field name in the snapshot published to hosts.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DeviceClass => "deviceClass",
            Self::DeviceColor => "deviceColor",
            Self::ModelNumber => "modelNumber",
            Self::ProductVersion => "productVersion",
            Self::SerialNumber => "serialNumber",
            Self::Imei => "imei",
            Self::Meid => "meid",
        }
    }

    /// Key understood by the device-management transport.
    pub fn transport_key(self) -> &'static str {
        match self {
            Self::Name => "DeviceName",
            Self::DeviceClass => "DeviceClass",
            Self::DeviceColor => "DeviceColor",
            Self::ModelNumber => "ModelNumber",
            Self::ProductVersion => "ProductVersion",
            Self::SerialNumber => "SerialNumber",
            Self::Imei => "InternationalMobileEquipmentIdentity",
            Self::Meid => "MobileEquipmentIdentifier",
        }
    }
}

/// Point-in-time identity snapshot for one device.
///
/// A field is present only if the transport returned a value for it; absent
/// fields are omitted from the serialized form, never nulled or left as an
/// empty-string placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProperties {
    pub udid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meid: Option<String>,
}

impl DeviceProperties {
    pub fn new(udid: impl Into<String>) -> Self {
        Self {
            udid: udid.into(),
            name: None,
            device_class: None,
            device_color: None,
            model_number: None,
            product_version: None,
            serial_number: None,
            imei: None,
            meid: None,
        }
    }

    pub fn set(&mut self, key: PropertyKey, value: String) {
        let slot = match key {
            PropertyKey::Name => &mut self.name,
            PropertyKey::DeviceClass => &mut self.device_class,
            PropertyKey::DeviceColor => &mut self.device_color,
            PropertyKey::ModelNumber => &mut self.model_number,
            PropertyKey::ProductVersion => &mut self.product_version,
            PropertyKey::SerialNumber => &mut self.serial_number,
            PropertyKey::Imei => &mut self.imei,
            PropertyKey::Meid => &mut self.meid,
        };
        *slot = Some(value);
    }

    pub fn get(&self, key: PropertyKey) -> Option<&str> {
        match key {
            PropertyKey::Name => self.name.as_deref(),
            PropertyKey::DeviceClass => self.device_class.as_deref(),
            PropertyKey::DeviceColor => self.device_color.as_deref(),
            PropertyKey::ModelNumber => self.model_number.as_deref(),
            PropertyKey::ProductVersion => self.product_version.as_deref(),
            PropertyKey::SerialNumber => self.serial_number.as_deref(),
            PropertyKey::Imei => self.imei.as_deref(),
            PropertyKey::Meid => self.meid.as_deref(),
        }
    }
}
