//! Tool Router - builds the rmcp ToolRouter from the operation catalog.
//!
//! One route per catalog entry; every route funnels into
//! [`ToolRegistry::call_tool`].

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};
use serde_json::Value;

use super::catalog::{self, OperationSpec};
use super::registry::ToolRegistry;

/// Build the tool router with all catalog operations.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    catalog::operations()
        .iter()
        .fold(ToolRouter::new(), |router, spec| {
            router.with_route(create_route(spec, registry.clone()))
        })
}

/// Create the ToolRoute for one operation.
pub fn create_route<S>(spec: &'static OperationSpec, registry: Arc<ToolRegistry>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(
        ToolRegistry::to_tool(spec),
        move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().map(Value::Object).unwrap_or(Value::Null);
            let registry = registry.clone();
            async move {
                registry
                    .call_tool(spec.name, args)
                    .await
                    .map_err(McpError::from)
            }
            .boxed()
        },
    )
}
