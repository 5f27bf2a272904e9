//! Tool descriptors and declarative argument schemas.
//!
//! A [`ToolDescriptor`] is the metadata every transport lists: name,
//! description and an [`ArgumentSchema`]. The schema is both the input of
//! the validator and, rendered as a JSON Schema object, the `inputSchema`
//! clients see.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

// ============================================================================
// Field kinds
// ============================================================================

/// Primitive JSON kind a field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether a runtime JSON value has this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the JSON kind of `value`, for error messages.
pub fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Field specs
// ============================================================================

/// Declaration of a single argument field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub description: Option<String>,
    /// Allowed values for a string field.
    pub allowed: Option<Vec<String>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Element kind for an array field.
    pub items: Option<FieldKind>,
    pub required: bool,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            allowed: None,
            minimum: None,
            maximum: None,
            items: None,
            required: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Object)
    }

    /// An array field whose elements must all be of `items` kind.
    pub fn array_of(name: impl Into<String>, items: FieldKind) -> Self {
        let mut spec = Self::new(name, FieldKind::Array);
        spec.items = Some(items);
        spec
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict a string field to the given values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Inclusive numeric bounds.
    pub fn range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// JSON Schema property object for this field.
    fn to_property(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".into(), json!(self.kind.as_str()));
        if let Some(items) = self.items {
            property.insert("items".into(), json!({ "type": items.as_str() }));
        }
        if let Some(allowed) = &self.allowed {
            property.insert("enum".into(), json!(allowed));
        }
        if let Some(minimum) = self.minimum {
            property.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            property.insert("maximum".into(), json!(maximum));
        }
        if let Some(description) = &self.description {
            property.insert("description".into(), json!(description));
        }
        Value::Object(property)
    }
}

// ============================================================================
// Argument schema
// ============================================================================

/// Ordered set of field declarations for one tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentSchema {
    fields: Vec<FieldSpec>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Declaration order is validation order.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Render as a JSON Schema object (`type`, `properties`, `required`).
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.to_property()))
            .collect();
        let required: Vec<&str> = self.required_fields().map(|f| f.name.as_str()).collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }
}

impl Serialize for ArgumentSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

// ============================================================================
// Tool descriptor
// ============================================================================

/// Listing metadata for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub schema: ArgumentSchema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ArgumentSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> ArgumentSchema {
        ArgumentSchema::new()
            .field(
                FieldSpec::string("platform")
                    .one_of(&["nes", "gb"])
                    .describe("Target platform")
                    .required(),
            )
            .field(FieldSpec::number("opacity").range(0.0, 100.0))
            .field(FieldSpec::array_of("sourceFiles", FieldKind::String).required())
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = Value::Object(sample_schema().to_json_schema());

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["platform"]["type"], "string");
        assert_eq!(schema["properties"]["platform"]["enum"], json!(["nes", "gb"]));
        assert_eq!(
            schema["properties"]["platform"]["description"],
            "Target platform"
        );
        assert_eq!(schema["properties"]["opacity"]["minimum"], json!(0.0));
        assert_eq!(schema["properties"]["opacity"]["maximum"], json!(100.0));
        assert_eq!(
            schema["properties"]["sourceFiles"]["items"],
            json!({ "type": "string" })
        );
        assert_eq!(schema["required"], json!(["platform", "sourceFiles"]));
    }

    #[test]
    fn test_optional_keywords_omitted() {
        let schema = ArgumentSchema::new().field(FieldSpec::boolean("testMode"));
        let property = &Value::Object(schema.to_json_schema())["properties"]["testMode"];

        assert_eq!(property, &json!({ "type": "boolean" }));
    }

    #[test]
    fn test_descriptor_serializes_input_schema() {
        let descriptor = ToolDescriptor::new("demo", "A demo tool", sample_schema());
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["name"], "demo");
        assert_eq!(value["description"], "A demo tool");
        assert_eq!(
            value["inputSchema"],
            Value::Object(sample_schema().to_json_schema())
        );
    }

    #[test]
    fn test_kind_matches() {
        assert!(FieldKind::Number.matches(&json!(4)));
        assert!(FieldKind::Number.matches(&json!(4.5)));
        assert!(!FieldKind::Number.matches(&json!("4")));
        assert!(FieldKind::Object.matches(&json!({})));
        assert!(!FieldKind::Array.matches(&json!({})));
        assert_eq!(json_kind_name(&Value::Null), "null");
    }
}
