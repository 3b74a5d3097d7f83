//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content provider.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod config_settings;
mod operation_catalog;

pub use config_settings::ConfigSettingsResource;
pub use operation_catalog::OperationCatalogResource;

use super::service::ResourceContent;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}
