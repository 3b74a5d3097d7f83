//! Clubhouse API MCP Server Library
//!
//! Exposes the Clubhouse REST API to MCP clients as a catalog of tools, one
//! per API operation. Each tool call is a single authenticated HTTP request
//! whose outcome (success, HTTP error or transport failure) is returned as
//! text.
//!
//! # Architecture
//!
//! - **core**: Server settings, credential resolution, error handling, the
//!   MCP server handler and the STDIO transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Operation catalog, request dispatcher and tool registry
//!   - **resources**: Read-only configuration and catalog resources
//!
//! # Example
//!
//! ```rust,no_run
//! use clubhouse_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
