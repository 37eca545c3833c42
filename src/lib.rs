//! Core library for the `speckit-to-issue` CLI.
//!
//! Parses speckit `tasks.md` documents, gathers context from the companion
//! spec documents, and turns the result into GitHub issues through the
//! `gh` command-line tool.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod issue;
pub mod logging;
pub mod ports;
pub mod service;
pub mod spec_context;
pub mod sync;
pub mod tasks;

pub use error::{Error, Result};

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
