//! Configuration for schemaform
//!
//! [`FormConfig`] is read with Figment from built-in defaults, then
//! `schemaform.toml|yaml|yml|json` in a directory and its `.schemaform/`
//! subdirectory, then `SCHEMAFORM_*` environment variables.

pub mod discovery;
pub mod error;
pub mod provider;

pub use discovery::{discover, ConfigFile, ConfigFormat, CONFIG_DIR_NAME, CONFIG_FILE_STEM};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, FormConfig, ENV_PREFIX};
