//! Transport layer for the MCP server.
//!
//! Only the STDIO transport is provided: the client spawns the server and
//! exchanges JSON-RPC messages over stdin/stdout. Logging goes to stderr so
//! it never interleaves with the protocol stream.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
