//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file with its parameters, its
//! descriptor and its `ToolHandler` implementation.

pub mod assets;
pub mod code;
pub mod common;
pub mod project;

pub use assets::{CreateAssetTool, GenerateSpriteTool};
pub use code::{CompileRomTool, EditInstructionFileTool, SetCodeOpacityTool};
pub use project::{BuildAndTestTool, CreateRetroProjectTool};
