//! Error types for the field compiler

use thiserror::Error;

/// Result type for field compiler operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while compiling a schema into field descriptors
#[derive(Debug, Error)]
pub enum FieldsError {
    /// The root schema is not an object schema
    #[error("root schema must be of type \"object\", found {found}")]
    RootNotObject { found: String },

    /// An override list entry could not be interpreted
    #[error("invalid definition entry at position {index}: {message}")]
    InvalidDefinition { index: usize, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldsError {
    /// Build a root type error from an optional type name
    pub fn root_not_object(found: Option<&str>) -> Self {
        Self::RootNotObject {
            found: match found {
                Some(name) => format!("\"{}\"", name),
                None => "no type".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::root_not_object(Some("string"));
        assert_eq!(
            err.to_string(),
            "root schema must be of type \"object\", found \"string\""
        );
    }

    #[test]
    fn test_missing_type_display() {
        let err = FieldsError::root_not_object(None);
        assert!(err.to_string().contains("no type"));
    }

    #[test]
    fn test_invalid_definition() {
        let err = FieldsError::InvalidDefinition {
            index: 2,
            message: "expected a string or an object".into(),
        };
        assert!(err.to_string().contains("position 2"));
        assert!(err.to_string().contains("expected a string"));
    }
}
