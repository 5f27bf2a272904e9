//! Create asset tool definition.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{
    ASSET_TYPES, AssetType, Platform, compact_numbers, platform_field,
};
use crate::domains::tools::envelope::ResultEnvelope;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::schema::{ArgumentSchema, FieldSpec, ToolDescriptor};
use crate::domains::tools::validator::ValidatedArguments;

/// Parameters for the asset creation tool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssetParams {
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    pub name: String,

    pub platform: Platform,

    /// Free-form, asset-specific settings.
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

/// Asset tool - creates tiles, sprites, music or palettes.
pub struct CreateAssetTool;

impl CreateAssetTool {
    pub const NAME: &'static str = "create_asset";

    pub const DESCRIPTION: &'static str = "Create game assets like tiles, sprites, or music";

    #[instrument(skip_all, fields(asset = %params.name))]
    pub fn execute(params: &CreateAssetParams) -> ResultEnvelope {
        info!(
            "Create asset called: {} for {}",
            params.asset_type, params.platform
        );

        let mut text = format!(
            "Created {} asset \"{}\" for {}.",
            params.asset_type, params.name, params.platform
        );
        if let Some(parameters) = &params.parameters {
            text.push_str(&format!(
                " Parameters: {}",
                compact_numbers(&Value::Object(parameters.clone()))
            ));
        }
        ResultEnvelope::text(text)
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            ArgumentSchema::new()
                .field(
                    FieldSpec::string("type")
                        .one_of(ASSET_TYPES)
                        .describe("Asset type")
                        .required(),
                )
                .field(FieldSpec::string("name").describe("Asset name").required())
                .field(platform_field("Target platform"))
                .field(FieldSpec::object("parameters").describe("Asset-specific parameters")),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateAssetTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn call(&self, arguments: ValidatedArguments) -> anyhow::Result<ResultEnvelope> {
        let params: CreateAssetParams = arguments.parse()?;
        Ok(Self::execute(&params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::error::ValidationError;
    use crate::domains::tools::validator::validate_against;
    use serde_json::json;

    async fn run(arguments: Value) -> String {
        let arguments =
            validate_against(&CreateAssetTool::descriptor().schema, &arguments).unwrap();
        let envelope = CreateAssetTool.call(arguments).await.unwrap();
        envelope.texts().next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_without_parameters() {
        let text = run(json!({ "type": "tile", "name": "brick", "platform": "gb" })).await;
        assert_eq!(text, "Created tile asset \"brick\" for gb.");
    }

    #[tokio::test]
    async fn test_with_parameters() {
        let text = run(json!({
            "type": "sprite",
            "name": "hero",
            "platform": "nes",
            "parameters": { "width": 16 }
        }))
        .await;
        assert_eq!(
            text,
            "Created sprite asset \"hero\" for nes. Parameters: {\"width\":16}"
        );
    }

    #[tokio::test]
    async fn test_parameters_keep_client_order() {
        let text = run(json!({
            "type": "palette",
            "name": "dusk",
            "platform": "snes",
            "parameters": { "width": 16, "height": 16.0, "colors": { "sky": 3, "ground": 1 } }
        }))
        .await;
        assert_eq!(
            text,
            "Created palette asset \"dusk\" for snes. \
             Parameters: {\"width\":16,\"height\":16,\"colors\":{\"sky\":3,\"ground\":1}}"
        );
    }

    #[test]
    fn test_unknown_asset_type_rejected() {
        let err = validate_against(
            &CreateAssetTool::descriptor().schema,
            &json!({ "type": "cutscene", "name": "intro", "platform": "snes" }),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EnumViolation { ref field, .. } if field == "type"));
    }
}
