//! Configuration management for the MCP server.
//!
//! Server-level settings (name, logging, HTTP client behaviour) are read from
//! `MCP_`-prefixed environment variables. Backend credentials are NOT part of
//! this struct: they are resolved fresh on every call by
//! [`ConfigResolver`](super::resolver::ConfigResolver).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use super::resolver::{EnvSource, ProcessEnv};

/// Default request timeout for backend calls, in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Outbound HTTP client configuration.
    pub http: HttpClientConfig,

    /// Where backend credentials are looked up.
    pub api: ApiSourceConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration of the shared `reqwest` client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

/// Credential source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSourceConfig {
    /// Explicit path of the fallback JSON config file.
    /// When `None`, `~/.api/config.json` is used.
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let name = "clubhouse-mcp-server".to_string();
        let version = env!("CARGO_PKG_VERSION").to_string();
        Self {
            http: HttpClientConfig {
                timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                user_agent: format!("{}/{}", name, version),
            },
            server: ServerConfig { name, version },
            logging: LoggingConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
            api: ApiSourceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured. Recognised keys:
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_HTTP_TIMEOUT_SECS`,
    /// `MCP_API_CONFIG_FILE`.
    ///
    /// Invalid values are reported through `tracing`, so install the
    /// subscriber first (see [`LoggingConfig::from_env`]).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_source(env: &dyn EnvSource) -> Self {
        let mut config = Self {
            logging: LoggingConfig::from_source(env),
            ..Self::default()
        };

        if let Some(name) = env.var("MCP_SERVER_NAME") {
            config.http.user_agent = format!("{}/{}", name, config.server.version);
            config.server.name = name;
        }

        if let Some(timeout) = env.var("MCP_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.http.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_HTTP_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_HTTP_TIMEOUT_SECS
                ),
            }
        }

        if let Some(path) = env.var("MCP_API_CONFIG_FILE") {
            info!("API config file overridden: {}", path);
            config.api.config_file = Some(PathBuf::from(path));
        }

        config
    }
}

impl LoggingConfig {
    /// Logging settings alone, readable before the subscriber exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &dyn EnvSource) -> Self {
        Self {
            level: env
                .var("MCP_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "clubhouse-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("clubhouse-mcp-server/"));
        assert!(config.api.config_file.is_none());
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_source() {
        let config = Config::from_source(&env(&[
            ("MCP_SERVER_NAME", "clubhouse-dev"),
            ("MCP_LOG_LEVEL", "debug"),
            ("MCP_HTTP_TIMEOUT_SECS", "5"),
            ("MCP_API_CONFIG_FILE", "/tmp/api.json"),
        ]));
        assert_eq!(config.server.name, "clubhouse-dev");
        assert!(config.http.user_agent.starts_with("clubhouse-dev/"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.api.config_file, Some(PathBuf::from("/tmp/api.json")));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        for raw in ["0", "soon", "-3"] {
            let config = Config::from_source(&env(&[("MCP_HTTP_TIMEOUT_SECS", raw)]));
            assert_eq!(config.http.timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        }
    }

    #[test]
    fn test_logging_config_matches_full_config() {
        let vars = env(&[("MCP_LOG_LEVEL", "trace"), ("MCP_HTTP_TIMEOUT_SECS", "x")]);
        assert_eq!(
            LoggingConfig::from_source(&vars).level,
            Config::from_source(&vars).logging.level
        );
        assert_eq!(LoggingConfig::from_source(&env(&[])).level, "info");
    }
}
