//! Core module containing shared infrastructure components.
//!
//! Configuration, the crate-level error type, the MCP protocol handler and
//! the transports that expose the tool dispatcher.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
