//! Core module containing shared infrastructure components.
//!
//! Server settings, backend credential resolution, error handling, the MCP
//! server handler and the STDIO transport live here. Everything specific to
//! the Clubhouse API lives under `domains`.

pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use resolver::{ApiConfig, ConfigResolver};
pub use server::McpServer;
pub use transport::{StdioTransport, TransportError};
