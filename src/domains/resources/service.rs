//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Dynamic
//! resources are computed on each read; the settings resource re-resolves
//! the backend configuration every time.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::info;

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::resolver::ConfigResolver;
use crate::domains::tools::catalog;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Source of the backend settings shown by `config://settings`.
    resolver: ConfigResolver,

    /// Registry of available resources, keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// How a resource's content is produced.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Computed on every read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Redacted snapshot of the resolved API configuration.
    ApiSettings,

    /// The operation catalog.
    OperationCatalog,
}

impl ResourceService {
    /// Create a new ResourceService reading settings through `resolver`.
    pub fn new(resolver: ConfigResolver) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            resolver,
            resources: BTreeMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Dynamic(dynamic_type) => {
                self.resolve_dynamic_content(uri, *dynamic_type)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        let json = match dynamic_type {
            DynamicResourceType::ApiSettings => {
                let snapshot = self
                    .resolver
                    .resolve()
                    .map_err(|e| ResourceError::config(e.to_string()))?
                    .redacted();
                serde_json::to_string_pretty(&snapshot)
            }
            DynamicResourceType::OperationCatalog => {
                serde_json::to_string_pretty(catalog::operations())
            }
        }
        .map_err(|e| ResourceError::internal(e.to_string()))?;

        Ok(ResourceContents::text(json, uri))
    }
}
