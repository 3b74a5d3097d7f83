//! Operation catalog resource.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// The operation table behind the tools, as JSON.
pub struct OperationCatalogResource;

impl ResourceDefinition for OperationCatalogResource {
    const URI: &'static str = "catalog://operations";
    const NAME: &'static str = "Operation Catalog";
    const DESCRIPTION: &'static str =
        "Every API operation exposed as a tool, with its HTTP method, path and query parameters";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::OperationCatalog)
    }
}
