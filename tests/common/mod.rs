//! Shared helpers for integration tests: an in-process mock Clubhouse
//! backend and dispatchers wired to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use clubhouse_mcp_server::core::ConfigResolver;
use clubhouse_mcp_server::core::resolver::{BASE_URL_ENV, BEARER_TOKEN_ENV};
use clubhouse_mcp_server::domains::tools::RequestDispatcher;

pub const TEST_TOKEN: &str = "test-token";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// Decoded-enough query pairs; test values never need percent-decoding.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }

    pub fn header(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

struct MockState {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock backend answering every path with a fixed status and body.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, None).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Option<Duration>) -> Self {
        let state = Arc::new(MockState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (state.status, state.body.clone()).into_response()
}

/// Resolver whose environment holds exactly `vars`, with no fallback file.
pub fn resolver_with(vars: &[(&str, &str)]) -> ConfigResolver {
    resolver_with_file(vars, None)
}

pub fn resolver_with_file(vars: &[(&str, &str)], config_file: Option<PathBuf>) -> ConfigResolver {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ConfigResolver::with_env(Arc::new(env), config_file)
}

pub fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap()
}

/// Dispatcher pointed at `base_url` with the test token.
pub fn dispatcher_for(base_url: &str) -> RequestDispatcher {
    dispatcher_with_timeout(base_url, Duration::from_secs(10))
}

pub fn dispatcher_with_timeout(base_url: &str, timeout: Duration) -> RequestDispatcher {
    let resolver = resolver_with(&[(BASE_URL_ENV, base_url), (BEARER_TOKEN_ENV, TEST_TOKEN)]);
    RequestDispatcher::with_client(client(timeout), resolver)
}
