//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `speckit-to-issue`.
#[derive(Debug, Parser)]
#[command(
    name = "speckit-to-issue",
    version,
    about = "Convert speckit tasks.md files to GitHub issues"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create GitHub issues from a tasks.md file.
    ///
    /// By default a single feature issue containing every task is created.
    /// Use --granular to create one issue per task.
    Create(CreateArgs),
    /// Show sync status between tasks and GitHub issues.
    Status {
        /// Path to the tasks.md file.
        tasks_file: PathBuf,
        /// Target repository (owner/repo).
        #[arg(short, long)]
        repo: Option<String>,
        /// Show detailed output.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the parsed tasks without touching GitHub.
    Show {
        /// Path to the tasks.md file.
        tasks_file: PathBuf,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Do not read the companion spec documents.
        #[arg(long)]
        no_context: bool,
    },
}

/// Arguments of `create`.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CreateArgs {
    /// Path to the tasks.md file.
    pub tasks_file: PathBuf,
    /// Preview without creating issues.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    /// Create individual issues per task.
    #[arg(short, long)]
    pub granular: bool,
    /// Skip tasks marked as complete (only with --granular).
    #[arg(short, long)]
    pub skip_complete: bool,
    /// Format issues for the Copilot coding agent and assign them to it.
    #[arg(short = 'c', long)]
    pub assign_copilot: bool,
    /// Do not inject spec context into issues.
    #[arg(long)]
    pub no_context: bool,
    /// Create issues even if they already exist.
    #[arg(short, long)]
    pub force: bool,
    /// Target repository (owner/repo).
    #[arg(short, long)]
    pub repo: Option<String>,
    /// Milestone to assign issues to.
    #[arg(short, long)]
    pub milestone: Option<String>,
    /// Show detailed output.
    #[arg(short, long)]
    pub verbose: bool,
}
