//! Session negotiator
//!
//! Drives one device through the connect → pair → validate → session →
//! populate → teardown sequence. This is the only component that calls into
//! the transport beyond property reads, and the only one that creates or
//! destroys device records.
//!
//! A failed negotiation is abandoned: no record is created, no event fires,
//! and the notification has no observable effect beyond a warn log. There is
//! no retry beyond the single pairing-validation retry.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info_span, warn, Instrument};

use tw_core::device::{DeviceProperties, DeviceRecord};
use tw_core::ports::{DeviceHandle, DeviceNotification, DeviceTransport, TransportError};
use tw_core::DeviceId;

use crate::extractor;
use crate::registry::DeviceRegistry;

/// Why a negotiation attempt was abandoned.
#[derive(Debug, Error)]
enum Abandon {
    #[error("connect failed: {0}")]
    Connect(TransportError),

    #[error("pairing failed: {0}")]
    Pairing(TransportError),

    #[error("pairing validation failed after re-pair: {0}")]
    PairingValidation(TransportError),

    #[error("session start failed: {0}")]
    Session(TransportError),
}

pub struct SessionNegotiator {
    transport: Arc<dyn DeviceTransport>,
}

impl SessionNegotiator {
    pub fn new(transport: Arc<dyn DeviceTransport>) -> Self {
        Self { transport }
    }

    /// Handles one transport notification against the registry. Returns
    /// `true` when the registry changed.
    pub async fn handle_notification(
        &self,
        registry: &mut DeviceRegistry,
        notification: DeviceNotification,
    ) -> bool {
        match notification {
            DeviceNotification::Attached(handle) => self.handle_attached(registry, handle).await,
            DeviceNotification::Detached(handle) => self.handle_detached(registry, handle).await,
        }
    }

    async fn handle_attached(&self, registry: &mut DeviceRegistry, handle: DeviceHandle) -> bool {
        let Some(udid) = self.read_identity(&handle).await else {
            return false;
        };
        if registry.contains(&udid) {
            // duplicate delivery within a tick, or a re-announce
            return false;
        }

        let span = info_span!("device.attach", udid = %udid);
        async {
            match self.negotiate(handle, &udid).await {
                Ok(record) => {
                    debug!("session established");
                    registry.insert(record)
                }
                Err(reason) => {
                    warn!(reason = %reason, "negotiation abandoned");
                    false
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn handle_detached(&self, registry: &mut DeviceRegistry, handle: DeviceHandle) -> bool {
        // a vanished device may refuse the identifier read; fall back to the
        // handle the record was established with so it cannot go stale
        let removed = match self.read_identity(&handle).await {
            Some(udid) => registry.remove(&udid),
            None => registry.remove_by_handle(&handle),
        };
        let Some(mut record) = removed else {
            // not tracked, nothing to do
            return false;
        };

        let span = info_span!("device.detach", udid = %record.id());
        async {
            self.teardown(&mut record).await;
            debug!("record torn down");
        }
        .instrument(span)
        .await;
        true
    }

    async fn read_identity(&self, handle: &DeviceHandle) -> Option<DeviceId> {
        let units = match self.transport.copy_identifier(handle).await {
            Ok(units) => units,
            Err(error) => {
                warn!(error = %error, "could not read device identifier");
                return None;
            }
        };
        match extractor::decode_native(&units) {
            Some(udid) => Some(DeviceId::new(udid)),
            None => {
                warn!("device identifier is not valid UTF-16");
                None
            }
        }
    }

    /// Linear success path for one device; any failure abandons the attempt.
    async fn negotiate(
        &self,
        handle: DeviceHandle,
        udid: &DeviceId,
    ) -> Result<DeviceRecord, Abandon> {
        self.transport
            .connect(&handle)
            .await
            .map_err(Abandon::Connect)?;

        match self.establish(&handle, udid).await {
            Ok(properties) => {
                let mut record = DeviceRecord::discovered(udid.clone(), handle);
                record.establish(properties);
                Ok(record)
            }
            Err(reason) => {
                // don't leak a half-open connection
                self.transport.disconnect(&handle).await;
                Err(reason)
            }
        }
    }

    async fn establish(
        &self,
        handle: &DeviceHandle,
        udid: &DeviceId,
    ) -> Result<DeviceProperties, Abandon> {
        let transport = self.transport.as_ref();

        // a failed is_paired probe is treated as "not paired"
        let paired = transport.is_paired(handle).await.unwrap_or(false);
        if !paired {
            transport.pair(handle).await.map_err(Abandon::Pairing)?;
        }

        if let Err(first) = transport.validate_pairing(handle).await {
            debug!(error = %first, "pairing validation failed, re-pairing once");
            transport.pair(handle).await.map_err(Abandon::Pairing)?;
            transport
                .validate_pairing(handle)
                .await
                .map_err(Abandon::PairingValidation)?;
        }

        transport
            .start_session(handle)
            .await
            .map_err(Abandon::Session)?;
        let properties = extractor::populate(transport, handle, udid).await;
        transport.stop_session(handle).await;

        Ok(properties)
    }

    /// Best-effort, unconditional cleanup of a record's owned resources.
    /// Every step runs regardless of earlier failures; never raises; safe to
    /// call more than once.
    pub async fn teardown(&self, record: &mut DeviceRecord) {
        let Some(resources) = record.begin_teardown() else {
            return;
        };
        self.transport.stop_session(&resources.handle).await;
        self.transport.disconnect(&resources.handle).await;
        for service in &resources.services {
            self.transport.close_service(service).await;
        }
    }
}
