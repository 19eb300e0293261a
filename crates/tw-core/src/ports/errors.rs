use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The device refused the call (not paired, user declined trust, ...).
    #[error("transport call refused: {0}")]
    Refused(String),

    /// The underlying channel to the device failed.
    #[error("transport i/o error: {0}")]
    Io(String),

    /// The device disappeared mid-call.
    #[error("device no longer attached")]
    Gone,
}
