//! Template sources keyed by field type
//!
//! A store starts from the builtin templates and can be overlaid with a
//! directory of `*.liquid` / `*.html` files; each file's stem names the
//! field type it renders, so `select.liquid` replaces the builtin select
//! template.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, TemplatingError};
use crate::security::check_template;

/// Name of the template every field type falls back to
pub const DEFAULT_TEMPLATE: &str = "default";

/// Extensions recognized when loading a template directory
pub const TEMPLATE_EXTENSIONS: &[&str] = &["liquid", "html"];

const BUILTINS: &[(&str, &str)] = &[
    (DEFAULT_TEMPLATE, include_str!("../templates/default.liquid")),
    ("text", include_str!("../templates/text.liquid")),
    ("select", include_str!("../templates/select.liquid")),
];

/// Where a template came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// Embedded in the binary
    Builtin,
    /// Loaded from a template directory
    Directory,
    /// Inserted by the caller
    Dynamic,
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Builtin => write!(f, "builtin"),
            TemplateSource::Directory => write!(f, "directory"),
            TemplateSource::Dynamic => write!(f, "dynamic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StoredTemplate {
    source: String,
    origin: TemplateSource,
}

/// A read-only map from field type to template source once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateStore {
    templates: IndexMap<String, StoredTemplate>,
}

impl TemplateStore {
    /// An empty store, without even a `default` template
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the builtin `default`, `text` and `select` templates
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for (name, source) in BUILTINS {
            store.templates.insert(
                (*name).to_string(),
                StoredTemplate {
                    source: (*source).to_string(),
                    origin: TemplateSource::Builtin,
                },
            );
        }
        store
    }

    /// Add or replace a template
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(
            name.into(),
            StoredTemplate {
                source: source.into(),
                origin: TemplateSource::Dynamic,
            },
        );
    }

    /// Overlay every template file found directly in `dir`.
    ///
    /// Untrusted files must pass the size and nesting limits. Files with
    /// other extensions are ignored; unreadable entries are skipped with a
    /// warning.
    pub fn load_dir(&mut self, dir: &Path, trusted: bool) -> Result<usize> {
        if !dir.is_dir() {
            return Err(TemplatingError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template directory does not exist",
                ),
            });
        }

        let mut loaded = 0;
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable template entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = template_name(path) else {
                continue;
            };

            let source = std::fs::read_to_string(path).map_err(|source| TemplatingError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            check_template(&name, &source, trusted)?;

            debug!(template = %name, path = %path.display(), "loaded template");
            self.templates.insert(
                name,
                StoredTemplate {
                    source,
                    origin: TemplateSource::Directory,
                },
            );
            loaded += 1;
        }
        Ok(loaded)
    }

    /// The source registered for exactly `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|t| t.source.as_str())
    }

    /// Where the template for `name` came from
    pub fn source_of(&self, name: &str) -> Option<TemplateSource> {
        self.templates.get(name).map(|t| t.origin)
    }

    /// The source for `name`, or the `default` template when none is registered
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).or_else(|| self.get(DEFAULT_TEMPLATE))
    }

    pub fn has_default(&self) -> bool {
        self.templates.contains_key(DEFAULT_TEMPLATE)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(name, t)| (name.as_str(), t.source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn template_name(path: &Path) -> Option<String> {
    let ext = path.extension().and_then(|s| s.to_str())?;
    if !TEMPLATE_EXTENSIONS.contains(&ext) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
