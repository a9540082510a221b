//! Reading schema, definition and data documents.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use schemaform::FormAttributes;
use serde_json::Value;

/// Path that means standard input
pub const STDIN_PATH: &str = "-";

/// Read a JSON or YAML document; the format follows the extension.
///
/// Stdin and unknown extensions are parsed as JSON first, then YAML.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", path.display())),
        Some("yaml") | Some("yml") => serde_yaml_ng::from_str(&text)
            .with_context(|| format!("{} is not valid YAML", path.display())),
        _ => serde_json::from_str(&text).or_else(|_| {
            serde_yaml_ng::from_str(&text)
                .with_context(|| format!("{} is neither JSON nor YAML", path.display()))
        }),
    }
}

/// Parse repeated `name=value` arguments, keeping their order.
pub fn parse_attrs(raw: &[String]) -> Result<FormAttributes> {
    let mut attrs = FormAttributes::new();
    for item in raw {
        let Some((name, value)) = item.split_once('=') else {
            bail!("form attribute `{item}` must be written as name=value");
        };
        if name.is_empty() {
            bail!("form attribute `{item}` has an empty name");
        }
        attrs.insert(name.to_string(), value.to_string());
    }
    Ok(attrs)
}
