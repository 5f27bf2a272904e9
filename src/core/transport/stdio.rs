//! STDIO transport implementation.
//!
//! MCP over standard input/output. Stdout carries protocol frames only;
//! logs go to stderr.

use rmcp::service::ServerInitializeError;
use rmcp::transport::IntoTransport;
use rmcp::{RoleServer, ServiceExt};
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport {
    server: McpServer,
}

impl StdioTransport {
    /// Create a STDIO transport serving the given protocol handler.
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    /// Serve the protocol until the peer disconnects.
    ///
    /// `transport` is `rmcp::transport::stdio()` in production. A peer that
    /// closes before completing `initialize` (stdin at EOF, `/dev/null`)
    /// ends the transport normally.
    pub async fn run<T, E, A>(self, transport: T) -> TransportResult<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        info!("Ready - communicating via stdin/stdout");

        let service = match self.server.serve(transport).await {
            Ok(service) => service,
            Err(ServerInitializeError::ConnectionClosed(stage)) => {
                info!("No MCP peer on STDIO ({}), transport stopped", stage);
                return Ok(());
            }
            Err(e) => return Err(TransportError::init(e.to_string())),
        };

        service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
