//! Tool handlers and the handler table.
//!
//! A handler is the implementation behind one tool name. Handlers only ever
//! receive [`ValidatedArguments`]; the table maps tool names to handlers and
//! is built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use super::envelope::ResultEnvelope;
use super::error::RegistryError;
use super::validator::ValidatedArguments;

/// Trait implemented by every tool implementation.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name of the tool this handler serves.
    fn name(&self) -> &str;

    /// Execute the tool. Errors are reported to the caller as handler faults.
    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope>;
}

/// Mapping from tool name to handler.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own name.
    pub fn register<H>(self, handler: H) -> Result<Self, RegistryError>
    where
        H: ToolHandler + 'static,
    {
        self.register_arc(Arc::new(handler))
    }

    /// Register an already shared handler.
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Result<Self, RegistryError> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateHandler(name));
        }
        self.handlers.insert(name, handler);
        Ok(self)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted for stable reporting.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.names())
            .finish()
    }
}
