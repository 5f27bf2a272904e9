//! Transport layer for the RetroIDE server.
//!
//! Two transports front the same dispatcher:
//! - **STDIO**: MCP JSON-RPC over standard input/output (`stdio.rs`, with
//!   the protocol handler in `core::server`)
//! - **HTTP**: JSON API plus the browser console (`http.rs`)
//!
//! `TransportService` runs whichever are enabled side by side.

mod config;
mod error;
mod service;

pub mod http;
pub mod stdio;

pub use config::{DEFAULT_HTTP_PORT, HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
