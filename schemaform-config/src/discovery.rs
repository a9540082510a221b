//! Configuration file discovery
//!
//! Looks for `schemaform.{toml,yaml,yml,json}` in a directory and in its
//! `.schemaform/` subdirectory. Files in `.schemaform/` take precedence.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "schemaform";

/// Subdirectory searched after the directory itself
pub const CONFIG_DIR_NAME: &str = ".schemaform";

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Extensions tried for each location, lowest precedence first
const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Every configuration file under `dir`, lowest precedence first
pub fn discover(dir: &Path) -> Vec<ConfigFile> {
    let mut files = Vec::new();
    for location in [dir.to_path_buf(), dir.join(CONFIG_DIR_NAME)] {
        for ext in EXTENSIONS {
            let path = location.join(format!("{CONFIG_FILE_STEM}.{ext}"));
            if !path.is_file() {
                trace!(path = %path.display(), "no config file");
                continue;
            }
            if let Some(format) = ConfigFormat::from_extension(ext) {
                files.push(ConfigFile { path, format });
            }
        }
    }
    debug!(dir = %dir.display(), found = files.len(), "discovered config files");
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_discover_orders_subdirectory_last() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(CONFIG_DIR_NAME)).unwrap();
        fs::write(dir.path().join(CONFIG_DIR_NAME).join("schemaform.toml"), "").unwrap();
        fs::write(dir.path().join("schemaform.json"), "{}").unwrap();
        fs::write(dir.path().join("schemaform.toml"), "").unwrap();
        fs::write(dir.path().join("other.toml"), "").unwrap();

        let files = discover(dir.path());
        let formats: Vec<ConfigFormat> = files.iter().map(|f| f.format).collect();
        assert_eq!(
            formats,
            vec![ConfigFormat::Toml, ConfigFormat::Json, ConfigFormat::Toml]
        );
        assert!(files[2].path.starts_with(dir.path().join(CONFIG_DIR_NAME)));
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path()).is_empty());
    }
}
