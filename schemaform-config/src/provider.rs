//! Configuration provider using Figment
//!
//! Sources are merged in precedence order, later ones overriding earlier
//! ones:
//! 1. Built-in defaults
//! 2. Configuration files discovered in the given directory
//! 3. Environment variables prefixed `SCHEMAFORM_`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use schemaform_fields::FormOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::discovery::{discover, ConfigFile, ConfigFormat};
use crate::error::{ConfigError, ConfigResult};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SCHEMAFORM_";

/// Settings shared by every form compiled in one process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Cascade a read-only root schema to fields without their own flag
    pub cascade_readonly: bool,
    /// Directory of template files overlaid on the builtin templates
    pub templates_dir: Option<PathBuf>,
    /// Property names never turned into default fields
    pub ignore: BTreeSet<String>,
    /// Skip the size and nesting limits for templates in `templates_dir`
    pub trusted_templates: bool,
}

impl FormConfig {
    /// Load configuration for `dir` from files and the environment
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        ConfigProvider::new(dir).load()
    }

    /// Compile options for the field builder.
    ///
    /// A relative `templates_dir` is left as-is; callers resolve it
    /// against the directory they loaded from.
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            ignore: self.ignore.iter().cloned().collect(),
            cascade_readonly: self.cascade_readonly,
            ..FormOptions::default()
        }
    }

    /// `templates_dir` resolved against `base` when relative
    pub fn templates_dir_in(&self, base: &Path) -> Option<PathBuf> {
        self.templates_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                base.join(dir)
            }
        })
    }
}

/// Builds a [`FormConfig`] from every source for one directory.
///
/// No caching is performed; each `load` reads the files again.
pub struct ConfigProvider {
    dir: PathBuf,
}

impl ConfigProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self) -> ConfigResult<FormConfig> {
        if !self.dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let files = discover(&self.dir);
        let config: FormConfig = self
            .build_figment(&files)
            .extract()
            .map_err(|e| ConfigError::parse_error(culprit(&e, &files), e))?;

        if let Some(dir) = &config.templates_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::invalid_value(
                    "templates_dir",
                    "must not be empty",
                ));
            }
        }

        debug!(
            files = files.len(),
            cascade_readonly = config.cascade_readonly,
            ignored = config.ignore.len(),
            "loaded form configuration"
        );
        Ok(config)
    }

    fn build_figment(&self, files: &[ConfigFile]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FormConfig::default()));
        for file in files {
            trace!(path = %file.path.display(), format = ?file.format, "merging config file");
            figment = match file.format {
                ConfigFormat::Toml => figment.merge(Toml::file(&file.path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(&file.path)),
                ConfigFormat::Json => figment.merge(Json::file(&file.path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }
}

/// The discovered file an extraction error points at, if any
fn culprit(error: &figment::Error, files: &[ConfigFile]) -> Option<PathBuf> {
    let source = error.metadata.as_ref()?.source.as_ref()?;
    let path = source.file_path()?;
    files
        .iter()
        .find(|file| file.path == path)
        .map(|file| file.path.clone())
}
