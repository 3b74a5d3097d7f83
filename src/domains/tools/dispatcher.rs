//! Generic request dispatcher.
//!
//! Turns one catalog entry plus caller arguments into exactly one HTTP
//! request and one textual result. Every failure mode (missing
//! configuration, transport errors, HTTP errors, even panics) is folded into
//! the result, so a tool call always produces text.

use futures::FutureExt;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::catalog::{HttpMethod, OperationSpec};
use crate::core::config::HttpClientConfig;
use crate::core::error::{Error, Result};
use crate::core::resolver::ConfigResolver;

/// Arguments of one tool call, keyed by parameter name.
pub type InvocationArgs = Map<String, Value>;

/// Normalized failure of a single dispatch.
///
/// The `Display` output is exactly what the caller sees. Transport failures
/// start with `Request failed:`, backend rejections with `API error`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(
        "Error: Missing API configuration. Please set API_BASE_URL and API_BEARER_TOKEN environment variables."
    )]
    ConfigMissing,

    #[error("Request failed: Connection error - {0}")]
    Connection(String),

    #[error("Request failed: Request timeout - {0}")]
    Timeout(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DispatchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        let detail = error_chain(&err);
        if err.is_connect() {
            Self::Connection(detail)
        } else if err.is_timeout() {
            Self::Timeout(detail)
        } else {
            Self::Transport(detail)
        }
    }
}

/// Result of one dispatch.
#[derive(Debug)]
pub enum Outcome {
    /// Backend answered below 400; pretty JSON or the raw body.
    Success(String),
    Failure(DispatchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Wrap the result text for MCP, flagging failures as tool errors.
    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            Self::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            Self::Failure(err) => CallToolResult::error(vec![Content::text(err.to_string())]),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(text) => f.write_str(text),
            Self::Failure(err) => write!(f, "{}", err),
        }
    }
}

/// Executes catalog operations against the configured backend.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    client: reqwest::Client,
    resolver: ConfigResolver,
}

impl RequestDispatcher {
    /// Build a dispatcher with its own HTTP client.
    pub fn new(resolver: ConfigResolver, http: &HttpClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(http.user_agent.as_str())
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, resolver))
    }

    /// Build a dispatcher around an existing client.
    pub fn with_client(client: reqwest::Client, resolver: ConfigResolver) -> Self {
        Self { client, resolver }
    }

    /// Run one operation. Never fails and never panics.
    #[instrument(skip(self, spec, args), fields(operation = spec.name, method = %spec.method))]
    pub async fn dispatch(&self, spec: &OperationSpec, args: &InvocationArgs) -> Outcome {
        let outcome = match AssertUnwindSafe(self.execute(spec, args))
            .catch_unwind()
            .await
        {
            Ok(Ok(body)) => Outcome::Success(body),
            Ok(Err(err)) => Outcome::Failure(err),
            Err(panic) => Outcome::Failure(DispatchError::Unexpected(panic_message(&*panic))),
        };

        match &outcome {
            Outcome::Success(body) => {
                info!("{} {} succeeded ({} bytes)", spec.method, spec.path, body.len())
            }
            Outcome::Failure(err) => warn!("{} {} failed: {}", spec.method, spec.path, err),
        }

        outcome
    }

    async fn execute(
        &self,
        spec: &OperationSpec,
        args: &InvocationArgs,
    ) -> std::result::Result<String, DispatchError> {
        let config = self
            .resolver
            .resolve()
            .map_err(|e| DispatchError::Unexpected(e.to_string()))?;

        let (Some(base_url), Some(token)) =
            (config.base_url.as_deref(), config.bearer_token.as_deref())
        else {
            return Err(DispatchError::ConfigMissing);
        };

        for name in args.keys() {
            if !spec.params.iter().any(|p| p.name == name.as_str()) {
                debug!("Ignoring undeclared argument '{}'", name);
            }
        }

        let query = query_pairs(spec, args);
        let url = endpoint_url(base_url, spec.path);
        debug!("Sending {} {} with {} query parameter(s)", spec.method, url, query.len());

        let mut request = match spec.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(ACCEPT, "application/json")
        .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(&query);
        }
        if spec.method == HttpMethod::Post {
            request = request.json(&Value::Object(Map::new()));
        }

        let response = request.send().await.map_err(DispatchError::from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(DispatchError::from_reqwest)?;
        let body = render_body(&text)?;

        if status.as_u16() >= 400 {
            return Err(DispatchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

/// Query pairs for `spec`, in declaration order, skipping falsy values.
pub fn query_pairs(spec: &OperationSpec, args: &InvocationArgs) -> Vec<(&'static str, String)> {
    spec.query_params()
        .filter_map(|param| {
            let value = args.get(param.name)?;
            if !is_truthy(value) {
                debug!("Omitting falsy query parameter '{}'", param.name);
                return None;
            }
            Some((param.name, query_value(value)))
        })
        .collect()
}

/// Whether a value is sent at all: empty strings, zero, `false`, `null` and
/// empty collections are not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Pretty-print a JSON body with two-space indent, or return it unchanged.
fn render_body(text: &str) -> std::result::Result<String, DispatchError> {
    match serde_json::from_str::<Value>(text) {
        Ok(json) => serde_json::to_string_pretty(&json)
            .map_err(|e| DispatchError::Unexpected(e.to_string())),
        Err(_) => Ok(text.to_string()),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during dispatch".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::catalog::lookup;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn args(value: Value) -> InvocationArgs {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([1])));
    }

    #[test]
    fn test_query_pairs_skip_falsy_and_keep_order() {
        let spec = lookup("get_get_events").unwrap();
        let pairs = query_pairs(
            spec,
            &args(json!({
                "is_filtered": "true",
                "page": "",
                "page_size": 25,
                "unrelated": "x"
            })),
        );
        assert_eq!(
            pairs,
            vec![("page_size", "25".to_string()), ("is_filtered", "true".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_without_params() {
        let spec = lookup("post_me").unwrap();
        assert!(query_pairs(spec, &args(json!({"page": "1"}))).is_empty());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("https://api.example", "/me"), "https://api.example/me");
        assert_eq!(endpoint_url("https://api.example/", "/me"), "https://api.example/me");
        assert_eq!(
            endpoint_url("https://api.example/v1", "/get_events"),
            "https://api.example/v1/get_events"
        );
    }

    #[test]
    fn test_render_body() {
        assert_eq!(render_body(r#"{"a":1}"#).unwrap(), "{\n  \"a\": 1\n}");
        assert_eq!(render_body("plain text").unwrap(), "plain text");
        assert_eq!(render_body("").unwrap(), "");
    }

    #[test]
    fn test_render_body_preserves_key_order() {
        let rendered = render_body(r#"{"zeta":1,"alpha":2}"#).unwrap();
        assert!(rendered.find("zeta").unwrap() < rendered.find("alpha").unwrap());
    }

    #[test]
    fn test_render_body_keeps_number_text() {
        assert_eq!(
            render_body(r#"{"id":123456789012345678901234}"#).unwrap(),
            "{\n  \"id\": 123456789012345678901234\n}"
        );
        assert_eq!(
            render_body(r#"{"score":0.1000000000000000055511151231257827}"#).unwrap(),
            "{\n  \"score\": 0.1000000000000000055511151231257827\n}"
        );
    }

    #[test]
    fn test_error_markers_are_distinct() {
        let transport = DispatchError::Connection("refused".into()).to_string();
        let http = DispatchError::Http {
            status: 500,
            body: "boom".into(),
        }
        .to_string();
        assert!(transport.starts_with("Request failed:"));
        assert!(http.starts_with("API error"));
        assert!(!http.starts_with("Request failed:"));
        assert!(
            DispatchError::Timeout("slow".into())
                .to_string()
                .starts_with("Request failed: Request timeout")
        );
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*boxed), "boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(&*boxed), "bang");
    }

    #[tokio::test]
    async fn test_missing_config_short_circuits() {
        let resolver = ConfigResolver::with_env(Arc::new(HashMap::<String, String>::new()), None);
        let config = crate::core::Config::default();
        let dispatcher = RequestDispatcher::new(resolver, &config.http).unwrap();

        let outcome = dispatcher
            .dispatch(lookup("post_me").unwrap(), &InvocationArgs::new())
            .await;

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.to_string(),
            "Error: Missing API configuration. Please set API_BASE_URL and API_BEARER_TOKEN environment variables."
        );
    }

    #[test]
    fn test_failure_becomes_tool_error() {
        let result = Outcome::Failure(DispatchError::ConfigMissing).into_call_tool_result();
        assert_eq!(result.is_error, Some(true));

        let result = Outcome::Success("ok".into()).into_call_tool_result();
        assert_ne!(result.is_error, Some(true));
    }
}
