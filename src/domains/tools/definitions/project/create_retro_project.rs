//! Create retro project tool definition.
//!
//! Acknowledges the creation of a new project for a target platform.
//! Scaffolding itself is not performed.

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

/// Parameters for the create project tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRetroProjectParams {
    /// Target retro gaming platform.
    pub platform: Platform,

    /// Name of the project.
    pub project_name: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create project tool - starts a new retro game project.
pub struct CreateRetroProjectTool;

impl CreateRetroProjectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_retro_project";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Create a new retro game project with specified platform";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project = %params.project_name))]
    pub fn execute(params: &CreateRetroProjectParams) -> ResultEnvelope {
        info!("Create project called for platform {}", params.platform);

        ResultEnvelope::text(format!(
            "Created retro project \"{}\" for platform \"{}\". Circuit-board metropolis initialized.",
            params.project_name, params.platform
        ))
    }

    /// Listing metadata for this tool.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(platform_field("Target retro gaming platform"))
                .field(
                    FieldSpec::string("projectName")
                        .describe("Name of the project")
                        .required(),
                ),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateRetroProjectTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: CreateRetroProjectParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================
