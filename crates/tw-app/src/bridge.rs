//! Event bridge: name → callback registry with synchronous dispatch.

use std::collections::HashMap;

use tracing::trace;

/// Host callback invoked with no arguments on dispatch.
pub type Listener = Box<dyn Fn() + Send>;

/// Single-slot listener table.
///
/// Holds at most one callback per event name; registering again for the same
/// name replaces the previous callback. Dispatch for a name with no
/// registered callback is a no-op, not an error.
#[derive(Default)]
pub struct EventBridge {
    listeners: HashMap<String, Listener>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `event`, replacing any existing one.
    pub fn register(&mut self, event: impl Into<String>, listener: Listener) {
        self.listeners.insert(event.into(), listener);
    }

    /// Synchronously invokes the callback registered for `event`, if any.
    pub fn dispatch(&self, event: &str) {
        if let Some(listener) = self.listeners.get(event) {
            trace!(event, "dispatching");
            listener();
        }
    }

    /// Drops every registered listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
