//! STDIO transport.
//!
//! stdout carries JSON-RPC frames only; all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serves an [`McpServer`] over stdin/stdout.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` until the client closes the stream.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();
        info!("{} ready on stdin/stdout", name);

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("{} stopped: {:?}", name, reason);
        Ok(())
    }
}
