//! Backend credential resolution.
//!
//! The base URL and bearer token are looked up on every call, field by field:
//!
//! 1. `API_BASE_URL` / `API_BEARER_TOKEN` from the environment
//! 2. `baseURL` / `bearerToken` from `~/.api/config.json`
//!
//! The first non-empty value wins. Nothing is cached, so edits to either
//! source take effect on the next tool call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::error::{Error, Result};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Environment variable holding the bearer token.
pub const BEARER_TOKEN_ENV: &str = "API_BEARER_TOKEN";

/// Source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Look up a variable, `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolved backend settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
}

impl ApiConfig {
    /// Both the base URL and the token are present.
    pub fn is_complete(&self) -> bool {
        self.base_url.is_some() && self.bearer_token.is_some()
    }

    /// A snapshot that is safe to hand to clients.
    pub fn redacted(&self) -> RedactedApiConfig {
        RedactedApiConfig {
            base_url: self.base_url.clone(),
            bearer_token: self.bearer_token.as_ref().map(|_| "***".to_string()),
            configured: self.is_complete(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Client-facing view of [`ApiConfig`] with the secret masked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RedactedApiConfig {
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
    pub configured: bool,
}

/// On-disk shape of the fallback config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "baseURL", default, deserialize_with = "lenient_string")]
    base_url: Option<String>,
    #[serde(rename = "bearerToken", default, deserialize_with = "lenient_string")]
    bearer_token: Option<String>,
}

/// Accept any JSON value, keeping only strings.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Resolves [`ApiConfig`] from the environment and the fallback file.
#[derive(Clone)]
pub struct ConfigResolver {
    env: Arc<dyn EnvSource>,
    config_file: Option<PathBuf>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("config_file", &self.config_file)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    /// Resolver over the process environment.
    ///
    /// `config_file` overrides the default `~/.api/config.json` location.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self::with_env(Arc::new(ProcessEnv), config_file.or_else(default_config_file))
    }

    /// Resolver over an arbitrary environment and an explicit file (or none).
    pub fn with_env(env: Arc<dyn EnvSource>, config_file: Option<PathBuf>) -> Self {
        Self { env, config_file }
    }

    /// Path of the fallback config file, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Resolve the current settings.
    ///
    /// Missing values are not an error. A config file that exists but cannot
    /// be read or parsed is.
    pub fn resolve(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig {
            base_url: non_empty(self.env.var(BASE_URL_ENV)),
            bearer_token: non_empty(self.env.var(BEARER_TOKEN_ENV)),
        };

        if config.is_complete() {
            return Ok(config);
        }

        if let Some(file) = self.read_config_file()? {
            if config.base_url.is_none() {
                config.base_url = non_empty(file.base_url);
            }
            if config.bearer_token.is_none() {
                config.bearer_token = non_empty(file.bearer_token);
            }
        }

        Ok(config)
    }

    fn read_config_file(&self) -> Result<Option<ConfigFile>> {
        let Some(path) = &self.config_file else {
            return Ok(None);
        };
        if !path.is_file() {
            debug!("No API config file at {}", path.display());
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let parsed = serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!("invalid JSON in {}: {}", path.display(), e))
        })?;
        debug!("Loaded API config file {}", path.display());
        Ok(Some(parsed))
    }
}

/// `~/.api/config.json`, when a home directory is known.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".api").join("config.json"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
