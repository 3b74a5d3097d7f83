//! Tools domain module.
//!
//! Every tool is a Clubhouse API operation. Tools are data, not code:
//!
//! - `catalog.rs` - The static operation table (name, method, path, params)
//! - `dispatcher.rs` - Generic authenticated request executor
//! - `registry.rs` - Tool metadata and name-based dispatch
//! - `router.rs` - rmcp ToolRouter built from the catalog
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! Add an [`OperationSpec`] row to `catalog::OPERATIONS`. Nothing else
//! changes.

pub mod catalog;
pub mod dispatcher;
mod error;
mod registry;
pub mod router;

pub use catalog::{HttpMethod, OperationSpec, ParamPlacement, ParamSpec};
pub use dispatcher::{DispatchError, InvocationArgs, Outcome, RequestDispatcher};
pub use error::ToolError;
pub use registry::{ToolRegistry, input_schema};
pub use router::build_tool_router;
