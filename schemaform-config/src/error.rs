//! Error types for schemaform configuration

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The directory to search for configuration does not exist
    #[error("Configuration directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Configuration parsing failed
    #[error("Failed to parse configuration{}: {source}", path_suffix(.path))]
    ParseError {
        path: Option<PathBuf>,
        source: Box<figment::Error>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Create a parse error, optionally naming the file it came from
    pub fn parse_error(path: Option<PathBuf>, source: figment::Error) -> Self {
        ConfigError::ParseError {
            path,
            source: Box::new(source),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::parse_error(None, error)
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("templates_dir", "not a directory");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for key 'templates_dir': not a directory"
        );
    }

    #[test]
    fn test_parse_error_names_file() {
        let source = figment::Error::from("expected a boolean".to_string());
        let err = ConfigError::parse_error(Some(PathBuf::from("schemaform.toml")), source);
        assert!(err.to_string().contains("in schemaform.toml"));
    }
}
