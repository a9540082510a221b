//! Library half of the `schemaform` binary.
//!
//! Argument definitions live in [`cli`]; [`commands::run`] executes a
//! parsed subcommand against any writer so it can be tested in-process.

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Commands};
