//! Generate sprite tool definition.
//!
//! Acknowledges a sprite generation request. Dimensions and palette size are
//! plain numbers; no sprite data is produced.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::format_number;
use crate::domains::tools::envelope::ResultEnvelope;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec, ToolDescriptor};
use crate::domains::tools::validator::ValidatedArguments;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the sprite generation tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSpriteParams {
    /// Sprite width in pixels.
    pub width: f64,

    /// Sprite height in pixels.
    pub height: f64,

    /// Number of colors.
    pub colors: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Sprite tool - generates a sprite asset.
pub struct GenerateSpriteTool;

impl GenerateSpriteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate_sprite";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a sprite asset for retro games";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &GenerateSpriteParams) -> ResultEnvelope {
        let size = format!(
            "{}x{}",
            format_number(params.width),
            format_number(params.height)
        );
        info!("Generate sprite called: {} with {} colors", size, params.colors);

        ResultEnvelope::text(format!(
            "Generated {} sprite with {} colors. Asset diffused and stabilized.",
            size,
            format_number(params.colors)
        ))
    }

    /// Listing metadata for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(
                    FieldSpec::number("width")
                        .describe("Sprite width in pixels")
                        .required(),
                )
                .field(
                    FieldSpec::number("height")
                        .describe("Sprite height in pixels")
                        .required(),
                )
                .field(
                    FieldSpec::number("colors")
                        .describe("Number of colors")
                        .required(),
                ),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for GenerateSpriteTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: GenerateSpriteParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================
