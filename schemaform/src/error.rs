//! Unified error type for the schemaform library

use schemaform_config::ConfigError;
use schemaform_fields::FieldsError;
use schemaform_templating::TemplatingError;
use schemaform_validation::ValidatorError;
use thiserror::Error as ThisError;

/// Any failure while building or rendering a [`crate::Form`]
///
/// Invalid submitted data is not an error; it is reported in the
/// [`crate::Submission`] returned by [`crate::Form::validate`].
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum FormError {
    /// Schema or definition could not be compiled into fields
    #[error("Field compilation failed: {0}")]
    Fields(#[from] FieldsError),

    /// Schema could not be prepared for validation
    #[error("Validation setup failed: {0}")]
    Validation(#[from] ValidatorError),

    /// Templates could not be loaded, compiled or rendered
    #[error("Template error: {0}")]
    Templating(#[from] TemplatingError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for schemaform operations
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_error_converts() {
        let err: FormError = FieldsError::root_not_object(Some("string")).into();
        assert!(matches!(err, FormError::Fields(_)));
        assert!(err.to_string().starts_with("Field compilation failed"));
    }

    #[test]
    fn test_templating_error_converts() {
        let err: FormError = TemplatingError::MissingDefault.into();
        assert!(err.to_string().contains("`default`"));
    }
}
