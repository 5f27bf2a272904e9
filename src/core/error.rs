//! Error types and handling for the RetroIDE server.
//!
//! Startup and serving failures. Per-call failures stay as
//! [`ToolError`](crate::domains::tools::ToolError) and are rendered by each
//! transport.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::tools::RegistryError;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog or handler table is inconsistent.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A transport failed to start or stopped abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
