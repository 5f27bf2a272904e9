//! Shared pieces for the retro tool definitions.
//!
//! Platform and asset enumerations, the matching schema fields, and
//! formatting helpers for acknowledgment text.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::domains::tools::schema::FieldSpec;

/// Platform identifiers accepted by every platform-aware tool.
pub const PLATFORMS: &[&str] = &["nes", "snes", "genesis", "gb"];

/// Asset kinds accepted by `create_asset`.
pub const ASSET_TYPES: &[&str] = &["tile", "sprite", "music", "palette"];

/// Target retro platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Nes,
    Snes,
    Genesis,
    Gb,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nes => "nes",
            Self::Snes => "snes",
            Self::Genesis => "genesis",
            Self::Gb => "gb",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of game asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Tile,
    Sprite,
    Music,
    Palette,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Sprite => "sprite",
            Self::Music => "music",
            Self::Palette => "palette",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required `platform` field restricted to [`PLATFORMS`].
pub fn platform_field(description: &str) -> FieldSpec {
    FieldSpec::string("platform")
        .one_of(PLATFORMS)
        .describe(description)
        .required()
}

/// Format a JSON number the way clients wrote it: `16` rather than `16.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Rewrite integral floats as integers, recursively, so `16.0` renders as `16`.
pub fn compact_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(compact_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), compact_numbers(item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_enum_matches_constant() {
        for name in PLATFORMS {
            let platform: Platform = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(platform.as_str(), *name);
        }
    }

    #[test]
    fn test_asset_enum_matches_constant() {
        for name in ASSET_TYPES {
            let asset: AssetType = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(asset.to_string(), *name);
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_compact_numbers() {
        let value = serde_json::json!({ "scale": 2.0, "ratio": 0.5, "frames": [1.0, 3] });
        assert_eq!(
            compact_numbers(&value).to_string(),
            r#"{"scale":2,"ratio":0.5,"frames":[1,3]}"#
        );
    }
}
