use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    /// The overlay was not attached to the host window when removal was requested.
    #[error("Overlay not attached: {0}")]
    NotAttached(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

impl BridgeError {
    /// Returns `true` for errors that only reflect a detach/fade-out race and
    /// can be ignored by the caller.
    pub fn is_benign_race(&self) -> bool {
        matches!(self, BridgeError::NotAttached(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
