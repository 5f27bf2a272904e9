//! Transport service - runs the enabled transports side by side.
//!
//! Every transport shares the dispatcher behind the given `McpServer`, so a
//! tool listed over STDIO is the tool listed over HTTP. The service returns
//! when Ctrl-C is received, when every transport has finished, or as soon as
//! one of them fails. A STDIO peer disconnecting, or never connecting, leaves
//! HTTP serving.

use rmcp::RoleServer;
use rmcp::transport::IntoTransport;
use tokio::task::JoinSet;
use tracing::{error, info};

use super::http::HttpTransport;
use super::stdio::StdioTransport;
use super::{TransportConfig, TransportError, TransportResult};
use crate::core::McpServer;

type TransportTask = (&'static str, TransportResult<()>);

/// Transport service - manages the transport layer for the server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Log information about the configured transports.
    pub fn log_info(&self) {
        info!("Starting transports: {}", self.config.description());
    }

    /// Start every enabled transport with the given MCP server.
    ///
    /// This method blocks until shutdown.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        self.run_with(server, rmcp::transport::stdio()).await
    }

    /// Same as [`run`](Self::run), with the STDIO side served on `stdio`.
    pub async fn run_with<T, E, A>(self, server: McpServer, stdio: T) -> TransportResult<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
        A: 'static,
    {
        self.log_info();

        let mut tasks: JoinSet<TransportTask> = JoinSet::new();

        if self.config.stdio {
            let transport = StdioTransport::new(server.clone());
            tasks.spawn(async move { ("stdio", transport.run(stdio).await) });
        }

        if let Some(http) = self.config.http {
            let transport = HttpTransport::new(http);
            let dispatcher = server.dispatcher().clone();
            tasks.spawn(async move { ("http", transport.run(dispatcher).await) });
        }

        if tasks.is_empty() {
            return Err(TransportError::init("no transport enabled"));
        }

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);
        let mut listening = true;

        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    None => {
                        info!("All transports finished");
                        return Ok(());
                    }
                    Some(Ok((name, Ok(())))) => {
                        info!("{} transport stopped", name);
                    }
                    Some(Ok((name, Err(e)))) => {
                        error!("{} transport failed: {}", name, e);
                        tasks.abort_all();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        error!("Transport task aborted: {}", e);
                        tasks.abort_all();
                        return Err(TransportError::TaskError(e.to_string()));
                    }
                },
                signal = &mut shutdown, if listening => {
                    if is_shutdown_request(&signal) {
                        info!("Shutting down");
                        tasks.abort_all();
                        return Ok(());
                    }
                    listening = false;
                }
            }
        }
    }
}

/// Whether a completed Ctrl-C listener asks for shutdown. A listener that
/// failed to install is logged and ignored.
fn is_shutdown_request(signal: &std::io::Result<()>) -> bool {
    match signal {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            false
        }
    }
}
