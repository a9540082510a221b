//! Validator error types

use schemaform_fields::FieldsError;

/// Errors raised while preparing validation.
///
/// Constraint mismatches in submitted data are never errors; they are
/// reported as [`crate::Violation`]s.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The schema could not be compiled into a validator
    #[error("Schema cannot be used for validation: {0}\n📋 Check keyword values such as `pattern` and `type` in the schema")]
    InvalidSchema(String),

    /// The schema could not be exported
    #[error(transparent)]
    Fields(#[from] FieldsError),
}

impl ValidatorError {
    /// Create an invalid schema error
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::InvalidSchema(msg.into())
    }

    /// Stable code for logs and API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidatorError::InvalidSchema(_) => "VALIDATION_SCHEMA",
            ValidatorError::Fields(_) => "VALIDATION_EXPORT",
        }
    }
}

/// Result type for validator operations
pub type ValidatorResult<T = ()> = Result<T, ValidatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_schema_message() {
        let err = ValidatorError::invalid_schema("\"[\" is not a valid regex");
        assert!(err.to_string().starts_with("Schema cannot be used for validation"));
        assert_eq!(err.error_code(), "VALIDATION_SCHEMA");
    }
}
