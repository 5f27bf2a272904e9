//! Tool Registry - the single catalog of tool descriptors.
//!
//! This module provides:
//! - The static catalog of every tool, in listing order
//! - `ToolRegistry`, the immutable lookup structure both transports list from

use std::collections::HashSet;

use super::definitions::{
    BuildAndTestTool, CompileRomTool, CreateAssetTool, CreateRetroProjectTool,
    EditInstructionFileTool, GenerateSpriteTool, SetCodeOpacityTool,
};
use super::error::RegistryError;
use super::schema::ToolDescriptor;

/// Every tool descriptor, in the order clients see them.
///
/// When adding a tool, add its descriptor here and its handler in
/// `router.rs`; startup fails if the two disagree.
pub fn catalog() -> Vec<ToolDescriptor> {
    vec![
        CreateRetroProjectTool::descriptor(),
        GenerateSpriteTool::descriptor(),
        CompileRomTool::descriptor(),
        EditInstructionFileTool::descriptor(),
        CreateAssetTool::descriptor(),
        BuildAndTestTool::descriptor(),
        SetCodeOpacityTool::descriptor(),
    ]
}

/// Immutable, ordered set of tool descriptors with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicate tool or field names.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(RegistryError::DuplicateTool(tool.name.clone()));
            }

            let mut fields = HashSet::new();
            for field in tool.schema.fields() {
                if !fields.insert(field.name.as_str()) {
                    return Err(RegistryError::DuplicateField {
                        tool: tool.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        Ok(Self { tools })
    }

    /// Registry over the built-in catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(catalog())
    }

    /// All descriptors in declaration order.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
