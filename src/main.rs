//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the Clubhouse API
//! tools over STDIO.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use clubhouse_mcp_server::core::config::LoggingConfig;
use clubhouse_mcp_server::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Must precede Config::from_env, which logs invalid settings
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config)?;

    info!(
        "Server initialized with {} tools",
        server.registry().tool_names().len()
    );

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
