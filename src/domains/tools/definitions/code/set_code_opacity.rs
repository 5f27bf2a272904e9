//! Set code opacity tool definition.
//!
//! The opacity level is acknowledged but not stored: later calls never
//! observe an earlier setting. Persisting it per filename would make the
//! handler stateful and require serializing writes per file.

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::format_number;
use crate::domains::tools::envelope::ResultEnvelope;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec, ToolDescriptor};
use crate::domains::tools::validator::ValidatedArguments;

/// Lowest and highest opacity percentage.
pub const OPACITY_RANGE: (f64, f64) = (0.0, 100.0);

/// Parameters for the opacity tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCodeOpacityParams {
    pub filename: String,

    /// Percentage, already checked against [`OPACITY_RANGE`].
    pub opacity: f64,
}

/// How much of a file's code is visible at a given opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    InterfaceOnly,
    FuzzyPreview,
    Full,
}

impl Visibility {
    pub fn for_opacity(opacity: f64) -> Self {
        if opacity == 0.0 {
            Self::InterfaceOnly
        } else if opacity < 50.0 {
            Self::FuzzyPreview
        } else {
            Self::Full
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InterfaceOnly => "interface only",
            Self::FuzzyPreview => "fuzzy preview",
            Self::Full => "full visibility",
        }
    }
}

/// Opacity tool - controls how much code is shown in the console.
pub struct SetCodeOpacityTool;

impl SetCodeOpacityTool {
    pub const NAME: &'static str = "set_code_opacity";

    pub const DESCRIPTION: &'static str = "Set opacity level for code files (0-100%) to control visibility in the circuit-board metropolis";

    #[instrument(skip_all, fields(filename = %params.filename))]
    pub fn execute(params: &SetCodeOpacityParams) -> ResultEnvelope {
        let visibility = Visibility::for_opacity(params.opacity);
        info!("Set opacity called: {}% ({:?})", params.opacity, visibility);

        ResultEnvelope::text(format!(
            "Set opacity of {} to {}%. Code now shows {}. Circuit fog adjusted.",
            params.filename,
            format_number(params.opacity),
            visibility.label()
        ))
    }

    pub fn descriptor() -> ToolDescriptor {
        let (min, max) = OPACITY_RANGE;
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(
                    FieldSpec::string("filename")
                        .describe("File to set opacity for")
                        .required(),
                )
                .field(
                    FieldSpec::number("opacity")
                        .range(min, max)
                        .describe("Opacity percentage (0 = interface only, 100 = full code)")
                        .required(),
                ),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for SetCodeOpacityTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: SetCodeOpacityParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}
