//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools and resources domains.
//!
//! ## Tool Architecture
//!
//! Tools are rows of `domains/tools/catalog.rs`. The ToolRouter is built from
//! that table in `domains/tools/router.rs`, so adding an operation does NOT
//! require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error;
use super::resolver::ConfigResolver;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    tools::{RequestDispatcher, ToolRegistry, build_tool_router},
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool metadata and dispatch.
    registry: Arc<ToolRegistry>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Backend credentials are read from the process environment and the
    /// fallback config file on every call.
    pub fn new(config: Config) -> error::Result<Self> {
        let resolver = ConfigResolver::new(config.api.config_file.clone());
        Self::with_resolver(config, resolver)
    }

    /// Create a server whose credentials come from `resolver`.
    pub fn with_resolver(config: Config, resolver: ConfigResolver) -> error::Result<Self> {
        match resolver.config_file() {
            Some(path) => info!("API config fallback file: {}", path.display()),
            None => info!("No API config fallback file; environment only"),
        }

        let config = Arc::new(config);
        let dispatcher = RequestDispatcher::new(resolver.clone(), &config.http)?;
        let registry = Arc::new(ToolRegistry::new(Arc::new(dispatcher)));
        let resource_service = Arc::new(ResourceService::new(resolver));

        Ok(Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config,
            registry,
            resource_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Clubhouse API tools. Each tool performs one authenticated API call and returns \
                 the response as pretty-printed JSON, or a diagnostic message on failure. \
                 Read config://settings to check whether API_BASE_URL and API_BEARER_TOKEN are set."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                _ => McpError::internal_error(e.to_string(), None),
            })
    }
}
