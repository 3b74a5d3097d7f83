//! Tool Registry - exposes every catalog operation as an MCP tool.
//!
//! This module provides:
//! - Tool metadata (name, description, input schema) derived from the catalog
//! - Name-based dispatch for tool calls
//!
//! The registry holds no per-call state; it only pairs catalog entries with
//! the shared [`RequestDispatcher`].

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::{Value, json};
use tracing::warn;

use super::catalog::{self, OperationSpec};
use super::dispatcher::{InvocationArgs, RequestDispatcher};
use super::error::ToolError;

/// Tool registry - pairs the operation catalog with a dispatcher.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    dispatcher: Arc<RequestDispatcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        catalog::operations().iter().map(|op| op.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        catalog::operations().iter().map(Self::to_tool).collect()
    }

    /// Create the Tool model for one operation.
    pub fn to_tool(spec: &OperationSpec) -> Tool {
        Tool {
            name: spec.name.into(),
            description: Some(spec.description.into()),
            input_schema: input_schema(spec),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Call a tool by name.
    ///
    /// `arguments` must be a JSON object (or null for no arguments).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ToolError> {
        let spec = catalog::lookup(name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", name);
        })?;

        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => InvocationArgs::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "expected an object, got {}",
                    other
                )));
            }
        };

        Ok(self.invoke(spec, &args).await)
    }

    async fn invoke(&self, spec: &OperationSpec, args: &InvocationArgs) -> CallToolResult {
        self.dispatcher
            .dispatch(spec, args)
            .await
            .into_call_tool_result()
    }
}

/// JSON Schema of an operation's arguments: one string property per param.
pub fn input_schema(spec: &OperationSpec) -> Arc<JsonObject> {
    let properties: JsonObject = spec
        .params
        .iter()
        .map(|param| {
            (
                param.name.to_string(),
                json!({ "type": "string", "description": param.description }),
            )
        })
        .collect();

    let required: Vec<&str> = spec
        .params
        .iter()
        .filter(|param| param.required)
        .map(|param| param.name)
        .collect();

    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    Arc::new(schema)
}
