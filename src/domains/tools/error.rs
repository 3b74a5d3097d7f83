//! Tool-specific error types.
//!
//! These cover failures of the MCP surface itself (unknown tool, malformed
//! arguments). Backend failures are never errors at this level: they are
//! rendered into the tool result by the dispatcher.

use thiserror::Error;

/// Errors that can occur while routing a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<ToolError> for rmcp::ErrorData {
    fn from(err: ToolError) -> Self {
        rmcp::ErrorData::invalid_params(err.to_string(), None)
    }
}
