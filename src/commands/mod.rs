//! Command dispatch and handlers.

pub mod create;
pub mod show;
pub mod status;

use std::path::Path;

use crate::cli::Command;
use crate::config::Config;
use crate::error::Error;
use crate::service::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// Loads configuration from the working directory and wires up the live
/// adapters before running the handler.
///
/// # Errors
///
/// Returns an error string if configuration fails or the handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let verbose = match command {
        Command::Create(args) => args.verbose,
        Command::Status { verbose, .. } => *verbose,
        Command::Show { .. } => false,
    };
    crate::logging::init(verbose);

    let config = Config::load(Path::new(".")).map_err(|e| describe(&e))?;
    let ctx = ServiceContext::live(&config);
    dispatch_with_context(command, &ctx, config)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: Config,
) -> Result<(), String> {
    match command {
        Command::Create(args) => {
            create::run(ctx, args, &config.with_repo_flag(args.repo.as_deref()))
        }
        Command::Status { tasks_file, repo, verbose } => {
            status::run(ctx, tasks_file, &config.with_repo_flag(repo.as_deref()), *verbose)
        }
        Command::Show { tasks_file, json, no_context } => {
            show::run(ctx, tasks_file, *json, *no_context)
        }
    }
}

/// User-facing message for an error.
fn describe(err: &Error) -> String {
    match err {
        Error::Parse(_) => format!("Parse error: {err}"),
        Error::Repository(_) => format!("Repository error: {err}"),
        _ => format!("Error: {err}"),
    }
}

/// Checks that `gh` is usable and resolves the target repository.
fn preflight(ctx: &ServiceContext, config: &Config, verbose: bool) -> Result<String, String> {
    if !ctx.issues.check_available() {
        return Err(
            "Error: GitHub CLI (gh) is not installed.\nInstall from: https://cli.github.com"
                .to_string(),
        );
    }
    ctx.issues.check_authenticated().map_err(|e| describe(&e))?;
    match &config.repo {
        Some(repo) => Ok(repo.clone()),
        None => {
            let repo = ctx.issues.current_repo().map_err(|e| describe(&e))?;
            if verbose {
                println!("Using repository: {repo}");
            }
            Ok(repo)
        }
    }
}

/// Prints a two-or-more column table with a title and aligned columns.
fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    println!("{title}");
    println!("{}", render_row(headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  "));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", render_row(&cells, &widths));
    }
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}


#[cfg(test)]
mod tests {
    use super::fakes::{context, FakeTracker, MemFs, TASKS, TASKS_PATH};
    use super::*;

    #[test]
    fn describe_prefixes_by_kind() {
        assert!(describe(&Error::parse("No tasks found")).starts_with("Parse error:"));
        assert!(describe(&Error::Repository("gone".into())).starts_with("Repository error:"));
        assert!(describe(&Error::RateLimit).starts_with("Error:"));
    }

    #[test]
    fn preflight_reports_missing_gh() {
        let tracker = FakeTracker { available: false, ..FakeTracker::default() };
        let ctx = context(MemFs::default(), &tracker);
        let err = preflight(&ctx, &Config::default(), false).unwrap_err();
        assert!(err.contains("not installed"));
    }

    #[test]
    fn preflight_requires_login() {
        let tracker = FakeTracker { authenticated: false, ..FakeTracker::default() };
        let ctx = context(MemFs::default(), &tracker);
        let err = preflight(&ctx, &Config::default(), false).unwrap_err();
        assert!(err.contains("gh auth login"));
    }

    #[test]
    fn preflight_prefers_configured_repo() {
        let ctx = context(MemFs::default(), &FakeTracker::default());
        let config = Config::default().with_repo_flag(Some("flag/repo"));
        assert_eq!(preflight(&ctx, &config, false).unwrap(), "flag/repo");
        assert_eq!(preflight(&ctx, &Config::default(), true).unwrap(), "owner/current");
    }

    #[test]
    fn dispatch_show_with_context() {
        let ctx = context(MemFs::default().with(TASKS_PATH, TASKS), &FakeTracker::default());
        let command =
            Command::Show { tasks_file: TASKS_PATH.into(), json: true, no_context: false };
        assert!(dispatch_with_context(&command, &ctx, Config::default()).is_ok());
    }
}
