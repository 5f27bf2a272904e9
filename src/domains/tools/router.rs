//! Dispatcher builder - pairs the catalog with its handlers.
//!
//! Both transports are served by the dispatcher built here, so there is
//! exactly one registry in the process.

use std::sync::Arc;

use crate::core::config::Config;

use super::definitions::{
    BuildAndTestTool, CompileRomTool, CreateAssetTool, CreateRetroProjectTool,
    EditInstructionFileTool, GenerateSpriteTool, SetCodeOpacityTool,
};
use super::dispatcher::Dispatcher;
use super::error::RegistryError;
use super::handlers::HandlerTable;
use super::registry::ToolRegistry;

/// Handler table with every built-in tool.
pub fn build_handler_table() -> Result<HandlerTable, RegistryError> {
    HandlerTable::new()
        .register(CreateRetroProjectTool)?
        .register(GenerateSpriteTool)?
        .register(CompileRomTool)?
        .register(EditInstructionFileTool)?
        .register(CreateAssetTool)?
        .register(BuildAndTestTool)?
        .register(SetCodeOpacityTool)
}

/// Build the shared dispatcher. Any catalog inconsistency is fatal.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher, RegistryError> {
    let registry = Arc::new(ToolRegistry::builtin()?);
    let handlers = build_handler_table()?;
    Dispatcher::new(registry, handlers, config.dispatch.handler_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_dispatcher() {
        let dispatcher = build_dispatcher(&Config::default()).unwrap();
        assert_eq!(dispatcher.list_tools().len(), 7);
        assert_eq!(dispatcher.handler_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_handler_table_matches_registry() {
        let registry = ToolRegistry::builtin().unwrap();
        let handlers = build_handler_table().unwrap();

        assert_eq!(registry.len(), handlers.len());
        for name in registry.tool_names() {
            assert!(handlers.contains(name), "no handler for {}", name);
        }
    }
}
