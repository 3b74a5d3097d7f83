//! Backend configuration resource.

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Current API settings; re-resolved on every read, token masked.
pub struct ConfigSettingsResource;

impl ResourceDefinition for ConfigSettingsResource {
    const URI: &'static str = "config://settings";
    const NAME: &'static str = "API Settings";
    const DESCRIPTION: &'static str =
        "Current API configuration (base URL and whether a bearer token is set)";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ApiSettings)
    }
}
