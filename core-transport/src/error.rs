//! # Transport Error Types
//!
//! Coordinator operations collapse missing collaborators to no-ops, so the
//! only fallible surfaces are construction and the async driver handle.

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors raised by the transport layer.
#[derive(Error, Debug)]
pub enum TransportError {
    // ========================================================================
    // Setup Errors
    // ========================================================================
    /// The supplied configuration failed validation.
    #[error("Invalid transport configuration: {0}")]
    Config(#[from] core_runtime::Error),

    /// A host bridge reported a failure that is not a benign race.
    #[error("Bridge failure: {0}")]
    Bridge(#[from] BridgeError),

    // ========================================================================
    // Driver Errors
    // ========================================================================
    /// The driver task has exited; commands can no longer be delivered.
    #[error("Transport driver stopped")]
    DriverStopped,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for TransportError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        TransportError::DriverStopped
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for TransportError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        TransportError::DriverStopped
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
