//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while serving the MCP session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The MCP handshake with the client failed.
    #[error("Server initialization error: {0}")]
    InitError(String),

    /// The running session terminated abnormally.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl TransportError {
    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitError(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }
}
