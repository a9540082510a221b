//! CLI definition for the schemaform command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// schemaform - schema-driven HTML forms
///
/// Compile a JSON or YAML schema into form fields, validate submitted data
/// against it, and render the form.
#[derive(Parser, Debug)]
#[command(name = "schemaform")]
#[command(version)]
#[command(about = "Compile, validate and render schema-driven forms")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory searched for schemaform.{toml,yaml,json} [default: current directory]
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the compiled field list as JSON
    Fields {
        /// Schema file (.json, .yaml or .yml)
        schema: PathBuf,
        /// Override list file; without it every default field is listed
        #[arg(long)]
        definition: Option<PathBuf>,
    },
    /// Validate a data file and print the errors by field
    ///
    /// Exits with status 2 when the data is invalid.
    Validate {
        /// Schema file (.json, .yaml or .yml)
        schema: PathBuf,
        /// Submitted data file, or `-` for stdin
        data: PathBuf,
    },
    /// Render the form as HTML
    Render {
        /// Schema file (.json, .yaml or .yml)
        schema: PathBuf,
        /// Override list file
        #[arg(long)]
        definition: Option<PathBuf>,
        /// Submitted data to validate and render inline
        #[arg(long)]
        data: Option<PathBuf>,
        /// Attribute for the <form> element, as name=value (repeatable)
        #[arg(long = "attr", value_name = "NAME=VALUE")]
        attrs: Vec<String>,
        /// Template directory overlaid on the builtin templates
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}
