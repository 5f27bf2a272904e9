//! Tool-specific error types.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::schema::FieldKind;

/// Client-input faults detected before any handler runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A required field is absent.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// A field has the wrong JSON kind.
    #[error("Invalid type for '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        actual: Value,
    },

    /// A string field is outside its enumeration.
    #[error("Invalid value for '{field}': {actual} is not one of [{}]", allowed.join(", "))]
    EnumViolation {
        field: String,
        allowed: Vec<String>,
        actual: Value,
    },

    /// A numeric field is outside its bounds.
    #[error("Out of range value for '{field}': {actual} is not within [{}, {}]", bound(min), bound(max))]
    RangeViolation {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
        actual: f64,
    },
}

fn bound(value: &Option<f64>) -> String {
    value.map_or_else(|| "unbounded".to_string(), |v| v.to_string())
}

impl ValidationError {
    /// Field the violation refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownTool(_) => None,
            Self::MissingRequiredField(field) => Some(field),
            Self::TypeMismatch { field, .. }
            | Self::EnumViolation { field, .. }
            | Self::RangeViolation { field, .. } => Some(field),
        }
    }
}

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The request was rejected before reaching a handler.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The handler returned an error or panicked.
    #[error("Tool '{tool}' failed: {message}")]
    HandlerFault { tool: String, message: String },

    /// The handler did not complete within the dispatch bound.
    #[error("Tool '{tool}' timed out after {}ms", after.as_millis())]
    Timeout { tool: String, after: Duration },

    /// Registry and handler table disagree at runtime.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "handler fault" error.
    pub fn handler_fault(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFault {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller can fix this by correcting its request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Startup-time catalog inconsistencies. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate tool name in registry: {0}")]
    DuplicateTool(String),

    #[error("Tool '{tool}' declares field '{field}' more than once")]
    DuplicateField { tool: String, field: String },

    #[error("Duplicate handler registered for tool: {0}")]
    DuplicateHandler(String),

    #[error("Tool '{0}' is registered without a handler")]
    MissingHandler(String),

    #[error("Handler '{0}' has no matching tool descriptor")]
    OrphanHandler(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::UnknownTool("nonexistent_tool".into()).to_string(),
            "Unknown tool: nonexistent_tool"
        );

        let err = ValidationError::EnumViolation {
            field: "platform".into(),
            allowed: vec!["nes".into(), "gb".into()],
            actual: json!("atari"),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'platform': \"atari\" is not one of [nes, gb]"
        );

        let err = ValidationError::RangeViolation {
            field: "opacity".into(),
            min: Some(0.0),
            max: Some(100.0),
            actual: 150.0,
        };
        assert_eq!(
            err.to_string(),
            "Out of range value for 'opacity': 150 is not within [0, 100]"
        );
    }

    #[test]
    fn test_client_error_classification() {
        let validation: ToolError = ValidationError::MissingRequiredField("name".into()).into();
        assert!(validation.is_client_error());
        assert_eq!(validation.to_string(), "Missing required field: name");

        assert!(!ToolError::handler_fault("compile_rom", "boom").is_client_error());
        assert!(!ToolError::internal("desync").is_client_error());
        assert!(
            !ToolError::Timeout {
                tool: "compile_rom".into(),
                after: Duration::from_millis(50),
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(
            ValidationError::MissingRequiredField("width".into()).field(),
            Some("width")
        );
        assert_eq!(ValidationError::UnknownTool("x".into()).field(), None);
    }
}
