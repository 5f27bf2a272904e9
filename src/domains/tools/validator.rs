//! Schema-driven argument validation.
//!
//! Every call passes through [`validate`] before a handler sees it. The only
//! way to obtain [`ValidatedArguments`] is a successful validation, so the
//! dispatcher cannot hand raw input to a handler by accident.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ValidationError;
use super::registry::ToolRegistry;
use super::schema::{ArgumentSchema, FieldKind, FieldSpec};

/// Arguments that passed schema validation for a specific tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArguments(Map<String, Value>);

impl ValidatedArguments {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Deserialize into a handler's typed parameter struct.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}

/// Validate `raw` against the schema of `tool_name`.
pub fn validate(
    registry: &ToolRegistry,
    tool_name: &str,
    raw: &Value,
) -> Result<ValidatedArguments, ValidationError> {
    let descriptor = registry
        .get(tool_name)
        .ok_or_else(|| ValidationError::UnknownTool(tool_name.to_string()))?;
    validate_against(&descriptor.schema, raw)
}

/// Validate `raw` against a schema. `null` counts as an empty object.
pub fn validate_against(
    schema: &ArgumentSchema,
    raw: &Value,
) -> Result<ValidatedArguments, ValidationError> {
    let arguments = match raw {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        other => {
            return Err(ValidationError::TypeMismatch {
                field: "arguments".to_string(),
                expected: FieldKind::Object,
                actual: other.clone(),
            });
        }
    };

    for spec in schema.fields() {
        match arguments.get(&spec.name) {
            None if spec.required => {
                return Err(ValidationError::MissingRequiredField(spec.name.clone()));
            }
            None => {}
            Some(value) => check_field(spec, value)?,
        }
    }

    Ok(ValidatedArguments(arguments))
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    if !spec.kind.matches(value) {
        return Err(ValidationError::TypeMismatch {
            field: spec.name.clone(),
            expected: spec.kind,
            actual: value.clone(),
        });
    }

    if let (Some(allowed), Some(text)) = (&spec.allowed, value.as_str()) {
        if !allowed.iter().any(|a| a == text) {
            return Err(ValidationError::EnumViolation {
                field: spec.name.clone(),
                allowed: allowed.clone(),
                actual: value.clone(),
            });
        }
    }

    if let Some(number) = value.as_f64() {
        let below = spec.minimum.is_some_and(|min| number < min);
        let above = spec.maximum.is_some_and(|max| number > max);
        if below || above {
            return Err(ValidationError::RangeViolation {
                field: spec.name.clone(),
                min: spec.minimum,
                max: spec.maximum,
                actual: number,
            });
        }
    }

    if let (Some(items), Some(elements)) = (spec.items, value.as_array()) {
        if let Some((index, element)) = elements
            .iter()
            .enumerate()
            .find(|(_, element)| !items.matches(element))
        {
            return Err(ValidationError::TypeMismatch {
                field: format!("{}[{}]", spec.name, index),
                expected: items,
                actual: element.clone(),
            });
        }
    }

    Ok(())
}
