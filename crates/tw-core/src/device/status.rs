use serde::{Deserialize, Serialize};

/// Device connection state machine
///
/// This is a pure type state machine with only state definitions and
/// transition validation logic. The transport calls that drive the
/// transitions are executed by the application layer (tw-app).
///
/// State transitions:
/// ```text
/// (not tracked)
///   │ attach notification
///   ▼
/// Discovered
///   │ connect → pair → validate → session → populate
///   ├── success ──► SessionEstablished
///   │                 │ detach notification / shutdown
///   │                 ▼
///   │               TornDown
///   └── any failure ─► abandoned (record never created)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// Attach notification seen, session negotiation not yet complete
    Discovered,

    /// Handshake succeeded and the property snapshot is populated
    SessionEstablished,

    /// Detached or shut down; owned resources released (terminal)
    TornDown,
}

impl ConnectionStatus {
    /// Check if this is the terminal state (no more transitions possible)
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::TornDown)
    }

    /// Check if the device session is live
    pub fn is_established(self) -> bool {
        matches!(self, Self::SessionEstablished)
    }

    /// Get the next state after a successful session negotiation
    pub fn on_established(self) -> Option<Self> {
        match self {
            Self::Discovered => Some(Self::SessionEstablished),
            _ => None,
        }
    }

    /// Get the next state after a detach notification or shutdown
    pub fn on_teardown(self) -> Self {
        Self::TornDown
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Discovered
    }
}
