//! Error types for templating operations

use std::path::PathBuf;

/// Errors that can occur while loading, compiling, or rendering templates
#[derive(Debug, thiserror::Error)]
pub enum TemplatingError {
    /// Template source could not be parsed
    #[error("Template parsing failed for `{name}`: {message}")]
    Parse { name: String, message: String },

    /// Template rendering failed
    #[error("Template rendering failed for field `{field}`: {message}")]
    Render { field: String, message: String },

    /// Template exceeded the safety limits for untrusted sources
    #[error("Template `{name}` rejected: {message}")]
    Security { name: String, message: String },

    /// No `default` template was supplied
    #[error("No `default` template is registered; every field type falls back to it")]
    MissingDefault,

    /// The render context could not be converted for the engine
    #[error("Render context is not representable: {0}")]
    Context(String),

    /// A template file or directory could not be read
    #[error("Failed to read template at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;
