//! Resources domain module.
//!
//! Read-only data exposed to MCP clients:
//!
//! - `config://settings` - the current backend configuration, token masked
//! - `catalog://operations` - the operation catalog behind the tools
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::get_all_resources;
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
