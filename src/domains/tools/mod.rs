//! Tools domain module.
//!
//! This module holds the tool catalog and everything needed to execute a
//! call against it, independent of any transport.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Descriptors and declarative argument schemas
//! - `registry.rs` - The catalog and `ToolRegistry`
//! - `validator.rs` - Schema-driven argument validation
//! - `handlers.rs` - `ToolHandler` trait and `HandlerTable`
//! - `dispatcher.rs` - Validate, invoke and normalize a call
//! - `router.rs` - Builds the shared `Dispatcher`
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `descriptor()` and a
//!    `ToolHandler` impl
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its descriptor to `catalog()` in `registry.rs`
//! 4. Register its handler in `router.rs`
//!
//! Transports pick the new tool up automatically.

pub mod definitions;
pub mod dispatcher;
pub mod envelope;
mod error;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod schema;
pub mod validator;

pub use dispatcher::{Dispatcher, ToolCall};
pub use envelope::{ContentBlock, ResultEnvelope};
pub use error::{RegistryError, ToolError, ValidationError};
pub use handlers::{HandlerTable, ToolHandler};
pub use registry::ToolRegistry;
pub use router::{build_dispatcher, build_handler_table};
pub use schema::{ArgumentSchema, FieldKind, FieldSpec, ToolDescriptor};
pub use validator::{ValidatedArguments, validate};
