//! `speckit-to-issue status` command.

use std::path::Path;

use super::{describe, preflight, print_table};
use crate::config::Config;
use crate::service::ServiceContext;
use crate::sync::{build_sync_report, SyncReport};
use crate::tasks::parse_tasks_file;

const TITLE_WIDTH: usize = 40;

/// Execute the `status` command.
///
/// Displays a table of every task with its sync state against the tracker,
/// followed by per-state totals.
///
/// # Errors
///
/// Returns an error string if the pre-flight checks, parsing or listing
/// issues fails.
pub fn run(
    ctx: &ServiceContext,
    tasks_file: &Path,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let repo = preflight(ctx, config, verbose)?;

    println!("\n📋 Checking: {}", tasks_file.display());
    let result = parse_tasks_file(ctx.fs.as_ref(), tasks_file).map_err(|e| describe(&e))?;
    for warning in &result.errors {
        eprintln!("Warning: {warning}");
    }

    let issues =
        ctx.issues.list_issues(Some(&repo), config.issue_limit).map_err(|e| describe(&e))?;
    tracing::debug!(count = issues.len(), %repo, "fetched issues");

    let report = build_sync_report(&result.tasks, &issues);
    println!();
    print_report(&repo, &report);
    Ok(())
}

fn truncate(title: &str, width: usize) -> String {
    title.chars().take(width).collect()
}

fn print_report(repo: &str, report: &SyncReport) {
    let rows: Vec<Vec<String>> = report
        .statuses
        .iter()
        .map(|status| {
            vec![
                status.task_id.clone(),
                truncate(&status.title, TITLE_WIDTH),
                status.state.label().to_string(),
                status.issue_number.map(|n| format!("#{n}")).unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&format!("📋 Sync Status: {repo}"), &["TASK", "TITLE", "STATUS", "ISSUE"], &rows);

    println!();
    print_table(
        "Summary",
        &["State", "Count"],
        &[
            vec!["Synced".to_string(), report.synced.to_string()],
            vec!["Missing".to_string(), report.missing.to_string()],
            vec!["Closed".to_string(), report.closed.to_string()],
            vec!["Complete".to_string(), report.complete.to_string()],
            vec!["Total".to_string(), report.total_tasks.to_string()],
        ],
    );
}
