//! RetroIDE server entry point.
//!
//! Loads configuration, initializes logging on stderr, builds the shared
//! dispatcher and runs the configured transports.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use retroide_mcp_server::core::{Config, McpServer, TransportService};
use retroide_mcp_server::domains::tools::build_dispatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    serve(config).await?;

    info!("Server shutting down");

    Ok(())
}

/// Build the shared dispatcher and run the configured transports.
///
/// A broken catalog aborts startup before any transport is bound.
async fn serve(config: Config) -> retroide_mcp_server::Result<()> {
    let dispatcher = Arc::new(build_dispatcher(&config)?);
    let server = McpServer::new(dispatcher)
        .with_identity(config.server.name.clone(), config.server.version.clone());

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr: stdout belongs to the MCP protocol.
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
