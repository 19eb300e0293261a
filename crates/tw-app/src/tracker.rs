//! Device tracker
//!
//! The host-facing context object. Owns the registry, listener table, dirty
//! flag and inbound notification queue, and drives them from the cooperative
//! pump loop. Everything happens on the caller's task inside one `pump`
//! call; there is no background threading and no call suspends beyond the
//! supplied timeout.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Instant;
use tracing::debug;

use tw_core::device::DeviceProperties;
use tw_core::events::DEVICES_CHANGED;
use tw_core::ports::{DeviceNotification, DeviceTransport, ServiceHandle};
use tw_core::{DeviceId, TrackerConfig};

use crate::bridge::{EventBridge, Listener};
use crate::negotiator::SessionNegotiator;
use crate::registry::DeviceRegistry;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("event name must not be empty")]
    EmptyEventName,
}

pub struct DeviceTracker {
    config: TrackerConfig,
    negotiator: SessionNegotiator,
    registry: DeviceRegistry,
    bridge: EventBridge,
    notifications: mpsc::Receiver<DeviceNotification>,
    dirty: bool,
}

impl DeviceTracker {
    /// Builds a tracker over the given transport and subscribes to its
    /// attach/detach notifications.
    pub async fn new(
        transport: Arc<dyn DeviceTransport>,
        config: TrackerConfig,
    ) -> anyhow::Result<Self> {
        let notifications = transport
            .subscribe_notifications()
            .await
            .context("subscribe to device notifications")?;

        Ok(Self {
            config,
            negotiator: SessionNegotiator::new(transport),
            registry: DeviceRegistry::new(),
            bridge: EventBridge::new(),
            notifications,
            dirty: false,
        })
    }

    /// Registers `listener` for `event`, replacing any listener previously
    /// registered for that name.
    pub fn register_listener(
        &mut self,
        event: &str,
        listener: Listener,
    ) -> Result<(), TrackerError> {
        if event.is_empty() {
            return Err(TrackerError::EmptyEventName);
        }
        self.bridge.register(event, listener);
        Ok(())
    }

    /// One pump tick bounded by the configured timeout.
    pub async fn pump(&mut self) {
        let timeout = self.config.pump_timeout();
        self.pump_for(timeout).await;
    }

    /// One cooperative pump tick.
    ///
    /// Drains queued notifications in arrival order, handing each to the
    /// negotiator synchronously, and stops when the queue is empty or the
    /// deadline passes, whichever is sooner. If the registry changed during
    /// the tick, dispatches `devicesChanged` exactly once afterwards;
    /// mutations within one tick are coalesced. An empty queue is a normal,
    /// silent outcome.
    pub async fn pump_for(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        self.dirty = false;

        loop {
            match self.notifications.try_recv() {
                Ok(notification) => {
                    let changed = self
                        .negotiator
                        .handle_notification(&mut self.registry, notification)
                        .await;
                    self.dirty |= changed;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
            if Instant::now() >= deadline {
                debug!("pump deadline reached with notifications still queued");
                break;
            }
        }

        if self.dirty {
            self.bridge.dispatch(DEVICES_CHANGED);
        }
    }

    /// Point-in-time snapshot of every device with an established session.
    /// Iteration order is unspecified; callers needing stable order must
    /// sort. Safe to call at any time, including with zero tracked devices.
    pub fn list_devices(&self) -> Vec<DeviceProperties> {
        self.registry.snapshots()
    }

    /// One-shot convenience: runs one pump tick, then returns the current
    /// roster.
    pub async fn devices(&mut self, timeout: Duration) -> Vec<DeviceProperties> {
        self.pump_for(timeout).await;
        self.list_devices()
    }

    /// Hands an auxiliary service resource to a tracked device's record for
    /// lifecycle ownership; it will be released on teardown. Returns `false`
    /// when the identity is not tracked.
    pub fn own_service(&mut self, id: &DeviceId, service: ServiceHandle) -> bool {
        match self.registry.get_mut(id) {
            Some(record) => {
                record.own_service(service);
                true
            }
            None => false,
        }
    }

    /// Forcibly tears down every tracked record, releasing its owned
    /// resources, and clears the listener table. Fires no events.
    pub async fn shutdown(&mut self) {
        for mut record in self.registry.drain() {
            self.negotiator.teardown(&mut record).await;
        }
        self.bridge.clear();
    }
}
