//! Scripted in-memory transport for negotiator and tracker tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use tw_core::ports::{
    DeviceHandle, DeviceNotification, DeviceTransport, ServiceHandle, TransportError,
};

pub fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Per-device script of handshake outcomes.
pub struct DeviceScript {
    pub identifier: Vec<u16>,
    pub connect_ok: bool,
    pub paired: bool,
    pub pair_ok: bool,
    /// Consumed front-to-back by `validate_pairing`; exhausted means valid.
    pub validate_results: VecDeque<bool>,
    pub session_ok: bool,
    /// Transport property key → native value.
    pub values: HashMap<String, Vec<u16>>,
}

impl DeviceScript {
    /// Already-paired device for which every handshake step succeeds.
    pub fn happy(udid: &str) -> Self {
        Self {
            identifier: utf16(udid),
            connect_ok: true,
            paired: true,
            pair_ok: false,
            validate_results: VecDeque::new(),
            session_ok: true,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), utf16(value));
        self
    }

    pub fn with_validate_results(mut self, results: impl IntoIterator<Item = bool>) -> Self {
        self.validate_results = results.into_iter().collect();
        self
    }

    pub fn refusing_connect(mut self) -> Self {
        self.connect_ok = false;
        self
    }

    pub fn unpaired(mut self) -> Self {
        self.paired = false;
        self
    }

    pub fn accepting_pair(mut self) -> Self {
        self.pair_ok = true;
        self
    }

    pub fn refusing_pair(mut self) -> Self {
        self.pair_ok = false;
        self
    }

    pub fn refusing_session(mut self) -> Self {
        self.session_ok = false;
        self
    }
}

/// In-memory transport. Tests push notifications through the returned
/// sender and assert on the recorded call log.
pub struct FakeTransport {
    devices: Mutex<HashMap<u64, DeviceScript>>,
    calls: Mutex<Vec<String>>,
    notifications: Mutex<Option<mpsc::Receiver<DeviceNotification>>>,
}

impl FakeTransport {
    pub fn new() -> (Arc<Self>, mpsc::Sender<DeviceNotification>) {
        let (tx, rx) = mpsc::channel(32);
        let transport = Arc::new(Self {
            devices: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            notifications: Mutex::new(Some(rx)),
        });
        (transport, tx)
    }

    pub fn script(&self, raw_handle: u64, script: DeviceScript) {
        self.devices.lock().unwrap().insert(raw_handle, script);
    }

    /// Drops a device's script, making every subsequent call for its handle
    /// fail as if the hardware vanished mid-flight.
    pub fn forget(&self, raw_handle: u64) {
        self.devices.lock().unwrap().remove(&raw_handle);
    }

    pub fn saw_call(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    pub fn count_call(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, device: &DeviceHandle, call: &str, ok: bool) -> Result<(), TransportError> {
        if ok {
            Ok(())
        } else {
            Err(TransportError::Refused(format!(
                "{call} refused for device {}",
                device.raw()
            )))
        }
    }
}

#[async_trait]
impl DeviceTransport for FakeTransport {
    async fn connect(&self, device: &DeviceHandle) -> Result<(), TransportError> {
        self.log(format!("connect({})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        self.check(device, "connect", script.connect_ok)
    }

    async fn is_paired(&self, device: &DeviceHandle) -> Result<bool, TransportError> {
        self.log(format!("is_paired({})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        Ok(script.paired)
    }

    async fn pair(&self, device: &DeviceHandle) -> Result<(), TransportError> {
        self.log(format!("pair({})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        self.check(device, "pair", script.pair_ok)
    }

    async fn validate_pairing(&self, device: &DeviceHandle) -> Result<(), TransportError> {
        self.log(format!("validate_pairing({})", device.raw()));
        let mut devices = self.devices.lock().unwrap();
        let script = devices.get_mut(&device.raw()).ok_or(TransportError::Gone)?;
        let valid = script.validate_results.pop_front().unwrap_or(true);
        self.check(device, "validate_pairing", valid)
    }

    async fn start_session(&self, device: &DeviceHandle) -> Result<(), TransportError> {
        self.log(format!("start_session({})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        self.check(device, "start_session", script.session_ok)
    }

    async fn stop_session(&self, device: &DeviceHandle) {
        self.log(format!("stop_session({})", device.raw()));
    }

    async fn disconnect(&self, device: &DeviceHandle) {
        self.log(format!("disconnect({})", device.raw()));
    }

    async fn copy_value(
        &self,
        device: &DeviceHandle,
        key: &str,
    ) -> Result<Option<Vec<u16>>, TransportError> {
        self.log(format!("copy_value({}, {key})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        Ok(script.values.get(key).cloned())
    }

    async fn copy_identifier(&self, device: &DeviceHandle) -> Result<Vec<u16>, TransportError> {
        self.log(format!("copy_identifier({})", device.raw()));
        let devices = self.devices.lock().unwrap();
        let script = devices.get(&device.raw()).ok_or(TransportError::Gone)?;
        Ok(script.identifier.clone())
    }

    async fn close_service(&self, service: &ServiceHandle) {
        self.log(format!("close_service({})", service.raw()));
    }

    async fn subscribe_notifications(
        &self,
    ) -> Result<mpsc::Receiver<DeviceNotification>, TransportError> {
        self.notifications
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| TransportError::Io("already subscribed".to_string()))
    }
}
