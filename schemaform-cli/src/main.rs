//! schemaform CLI - compile, validate and render schema-driven forms.
//!
//! Commands:
//! - `schemaform fields <schema> [--definition file]`: print compiled fields as JSON
//! - `schemaform validate <schema> <data>`: print errors by field
//! - `schemaform render <schema> [--definition file] [--data file] [--attr k=v]... [--templates dir]`
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: Submitted data is invalid (`validate` only)

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemaform_cli::{commands, Cli};

/// Exit code for any failure
const ERROR_EXIT_CODE: i32 = 1;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("schemaform=debug,schemaform_fields=trace,schemaform_validation=debug,schemaform_templating=debug,schemaform_config=debug,schemaform_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = commands::run(cli.command, cli.config_dir.as_deref(), &mut stdout);
    let exit_code = result_to_exit(flush_output(result, &mut stdout));
    drop(stdout);
    std::process::exit(exit_code);
}

/// Flush buffered output, turning a failed flush into a command error.
///
/// An earlier command error wins over a flush error.
fn flush_output(result: anyhow::Result<i32>, out: &mut impl Write) -> anyhow::Result<i32> {
    let flushed = out.flush().context("failed to flush stdout");
    let code = result?;
    flushed?;
    Ok(code)
}

/// Convert a command result to an exit code.
fn result_to_exit(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ERROR_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaform_cli::Commands;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_fields() {
        let cli = Cli::parse_from(["schemaform", "fields", "schema.json"]);
        assert!(!cli.debug);
        match cli.command {
            Commands::Fields { schema, definition } => {
                assert_eq!(schema, PathBuf::from("schema.json"));
                assert!(definition.is_none());
            }
            _ => panic!("Expected Fields command"),
        }
    }

    #[test]
    fn test_cli_parsing_render_repeated_attrs() {
        let cli = Cli::parse_from([
            "schemaform",
            "--debug",
            "render",
            "s.yaml",
            "--attr",
            "method=post",
            "--attr",
            "action=/x",
            "--templates",
            "tpl",
        ]);
        assert!(cli.debug);
        match cli.command {
            Commands::Render {
                attrs, templates, ..
            } => {
                assert_eq!(attrs, vec!["method=post", "action=/x"]);
                assert_eq!(templates, Some(PathBuf::from("tpl")));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_stdin() {
        let cli = Cli::parse_from(["schemaform", "validate", "s.json", "-"]);
        assert!(matches!(cli.command, Commands::Validate { ref data, .. } if data == &PathBuf::from("-")));
    }

    #[test]
    fn test_result_to_exit() {
        assert_eq!(result_to_exit(Ok(0)), 0);
        assert_eq!(result_to_exit(Ok(2)), 2);
        assert_eq!(result_to_exit(Err(anyhow::anyhow!("boom"))), ERROR_EXIT_CODE);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_failed_flush_exits_with_error() {
        let result = flush_output(Ok(0), &mut BrokenPipe);
        let err = result.as_ref().unwrap_err();
        assert!(format!("{err:#}").contains("failed to flush stdout"));
        assert_eq!(result_to_exit(result), ERROR_EXIT_CODE);
    }

    #[test]
    fn test_flush_keeps_command_exit_code() {
        let mut out = Vec::new();
        assert_eq!(result_to_exit(flush_output(Ok(2), &mut out)), 2);
        let failed = flush_output(Err(anyhow::anyhow!("boom")), &mut BrokenPipe);
        assert_eq!(format!("{:#}", failed.unwrap_err()), "boom");
    }
}
