//! Subcommand handlers.
//!
//! Each handler writes its output to the given writer and returns the
//! process exit code.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use schemaform::{Definition, Form, FormConfig, SchemaNode, Submission};
use serde_json::json;
use tracing::debug;

use crate::cli::Commands;
use crate::input::{load_document, parse_attrs};

/// Exit code for success
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// Exit code returned when submitted data fails validation
pub const INVALID_DATA_EXIT_CODE: i32 = 2;

/// Run one subcommand.
pub fn run(command: Commands, config_dir: Option<&Path>, out: &mut impl Write) -> Result<i32> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let base = match config_dir {
        Some(dir) => absolute(&cwd, dir),
        None => cwd.clone(),
    };
    let mut config = FormConfig::load(&base)
        .with_context(|| format!("failed to load configuration from {}", base.display()))?;
    debug!(config_dir = %base.display(), ?config, "configuration loaded");

    match command {
        Commands::Fields { schema, definition } => {
            let form = compile(&schema, definition.as_deref(), &config, &base)?;
            serde_json::to_writer_pretty(&mut *out, form.fields())?;
            writeln!(out)?;
            Ok(SUCCESS_EXIT_CODE)
        }
        Commands::Validate { schema, data } => {
            let form = compile(&schema, None, &config, &base)?;
            let state = form.validate(load_document(&data)?);
            let report = json!({"valid": state.is_valid(), "errors": state.errors});
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
            Ok(if state.is_valid() {
                SUCCESS_EXIT_CODE
            } else {
                INVALID_DATA_EXIT_CODE
            })
        }
        Commands::Render {
            schema,
            definition,
            data,
            attrs,
            templates,
        } => {
            if let Some(dir) = templates {
                config.templates_dir = Some(absolute(&cwd, &dir));
            }
            let attrs = parse_attrs(&attrs)?;
            let form = compile(&schema, definition.as_deref(), &config, &base)?;
            let state = match data {
                Some(path) => form.validate(load_document(&path)?),
                None => Submission::new(),
            };
            let html = form.render(&state, &attrs)?;
            writeln!(out, "{html}")?;
            Ok(SUCCESS_EXIT_CODE)
        }
    }
}

fn compile(
    schema: &Path,
    definition: Option<&Path>,
    config: &FormConfig,
    base: &Path,
) -> Result<Form> {
    let schema_node = SchemaNode::from_value(load_document(schema)?)
        .with_context(|| format!("{} is not a usable schema", schema.display()))?;
    let definition = definition
        .map(|path| {
            Definition::from_value(load_document(path)?)
                .with_context(|| format!("{} is not a valid override list", path.display()))
        })
        .transpose()?;

    Form::from_config(schema_node, definition.as_ref(), config, base)
        .with_context(|| format!("failed to compile form for {}", schema.display()))
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
