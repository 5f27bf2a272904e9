//! RetroIDE tool server library.
//!
//! One catalog of retro game development tools (projects, sprites, assets,
//! ROM builds and code opacity) served over two transports at once:
//! MCP JSON-RPC on stdin/stdout and a JSON API on HTTP with a browser
//! console.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP protocol handler and
//!   the transports
//! - **domains**
//!   - **tools**: descriptors, argument validation, handlers and the
//!     dispatcher shared by every transport
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use retroide_mcp_server::core::{Config, McpServer, TransportService};
//! use retroide_mcp_server::domains::tools::build_dispatcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(Arc::new(build_dispatcher(&config)?));
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
