//! `speckit-to-issue create` command.

use std::collections::BTreeSet;

use super::{describe, preflight, print_table};
use crate::cli::CreateArgs;
use crate::config::Config;
use crate::issue::{build_feature_issue, ensure_labels, feature_labels, labels_for_tasks};
use crate::ports::ExistingIssue;
use crate::service::ServiceContext;
use crate::spec_context::{read_spec_context, SpecContext};
use crate::sync::{
    execute_create, find_feature_issue, plan_create, CreateOptions, CreateResult, TaskResult,
};
use crate::tasks::{parse_tasks_file, ParseResult};

/// Execute the `create` command.
///
/// Feature mode (the default) creates one issue covering every task;
/// `--granular` creates one issue per task. `--dry-run` never touches the
/// tracker.
///
/// # Errors
///
/// Returns an error string if parsing, the pre-flight checks, listing
/// existing issues or creating the feature issue fails.
pub fn run(ctx: &ServiceContext, args: &CreateArgs, config: &Config) -> Result<(), String> {
    if args.skip_complete && !args.granular {
        eprintln!("Warning: --skip-complete only applies with --granular");
    }

    let context = if args.no_context {
        None
    } else {
        let context = read_spec_context(ctx.fs.as_ref(), &args.tasks_file);
        for warning in &context.extraction_warnings {
            eprintln!("Warning: {warning}");
        }
        if context.is_empty() {
            if args.verbose {
                println!("No spec context found");
            }
            None
        } else {
            if args.verbose {
                println!("📚 Loaded spec context from {}", context.files_found.join(", "));
            }
            Some(context)
        }
    };

    let repo = if args.dry_run {
        config.repo.clone()
    } else {
        Some(preflight(ctx, config, args.verbose)?)
    };

    println!("\n📋 Parsing: {}", args.tasks_file.display());
    let result = parse_tasks_file(ctx.fs.as_ref(), &args.tasks_file).map_err(|e| describe(&e))?;
    println!(
        "   Found {} tasks ({} complete, {} incomplete)",
        result.tasks.len(),
        result.complete_count(),
        result.incomplete_count()
    );
    for warning in &result.errors {
        eprintln!("Warning: {warning}");
    }

    let existing = if args.dry_run || args.force {
        Vec::new()
    } else {
        ctx.issues
            .list_issues(repo.as_deref(), config.issue_limit)
            .map_err(|e| describe(&e))?
    };

    if args.dry_run {
        println!("\n🔍 Dry run - no issues will be created\n");
    } else {
        let labels: BTreeSet<String> = if args.granular {
            labels_for_tasks(&result.tasks)
        } else {
            feature_labels(&result.spec_name, &result.tasks).into_iter().collect()
        };
        if args.verbose {
            let names: Vec<&str> = labels.iter().map(String::as_str).collect();
            println!("Ensuring labels: {}", names.join(", "));
        }
        ensure_labels(ctx.issues.as_ref(), &labels, repo.as_deref());
        println!("\n🚀 Creating issues in {}\n", repo.as_deref().unwrap_or("current repository"));
    }

    if args.granular {
        create_granular_issues(ctx, args, &result, &existing, context.as_ref(), repo.as_deref());
        Ok(())
    } else {
        create_feature_issue(ctx, args, &result, &existing, context.as_ref(), repo.as_deref())
    }
}

fn create_feature_issue(
    ctx: &ServiceContext,
    args: &CreateArgs,
    result: &ParseResult,
    existing: &[ExistingIssue],
    context: Option<&SpecContext>,
    repo: Option<&str>,
) -> Result<(), String> {
    if !args.force {
        if let Some(found) = find_feature_issue(&result.spec_name, existing) {
            println!("   ⏭️  Feature issue already exists: #{}", found.number);
            println!("      {}", found.url);
            return Ok(());
        }
    }

    let mut issue =
        build_feature_issue(&result.spec_name, context, &result.tasks, args.assign_copilot);
    issue.milestone.clone_from(&args.milestone);

    if args.dry_run {
        println!("   ✅ Would create: {}", issue.title);
        println!("      Tasks: {}", result.tasks.len());
        println!("      Labels: {}", issue.labels.join(", "));
        if let Some(assignee) = &issue.assignee {
            println!("      Assignee: {assignee}");
        }
    } else {
        let url = ctx
            .issues
            .create_issue(&issue, repo)
            .map_err(|e| format!("Failed to create feature issue: {e}"))?;
        println!("   ✅ Created: {}", issue.title);
        println!("      {url}");
        if args.verbose {
            println!("      Tasks: {}", result.tasks.len());
        }
    }

    println!();
    let created = if args.dry_run { "1 (dry run)" } else { "1" };
    print_table(
        "📊 Summary",
        &["Metric", "Value"],
        &[
            vec!["Feature Issue".to_string(), created.to_string()],
            vec!["Tasks Included".to_string(), result.tasks.len().to_string()],
            vec!["Phases".to_string(), result.phases.len().to_string()],
        ],
    );
    Ok(())
}

fn create_granular_issues(
    ctx: &ServiceContext,
    args: &CreateArgs,
    result: &ParseResult,
    existing: &[ExistingIssue],
    context: Option<&SpecContext>,
    repo: Option<&str>,
) {
    let actions = plan_create(&result.tasks, existing, args.skip_complete, args.force);
    let options = CreateOptions {
        copilot_mode: args.assign_copilot,
        milestone: args.milestone.as_deref(),
        repo,
        dry_run: args.dry_run,
    };
    let verbose = args.verbose;
    let summary = execute_create(ctx.issues.as_ref(), &actions, &options, context, |r| {
        print_result(r, args.dry_run, verbose);
    });

    println!();
    print_table(
        "📊 Summary",
        &["Status", "Count"],
        &[
            vec!["Created".to_string(), summary.created.to_string()],
            vec!["Skipped (exists)".to_string(), summary.skipped_exists.to_string()],
            vec!["Skipped (complete)".to_string(), summary.skipped_complete.to_string()],
            vec!["Failed".to_string(), summary.failed.to_string()],
        ],
    );
}

fn print_result(result: &TaskResult, dry_run: bool, verbose: bool) {
    let label = format!("[{}] {}", result.task_id, result.title);
    match result.result {
        CreateResult::SkippedComplete => println!("   ⏭️  {label} (complete)"),
        CreateResult::SkippedExists => {
            let number = result.issue_number.map(|n| format!("#{n}")).unwrap_or_default();
            println!("   ⏭️  {label} (exists: {number})");
        }
        CreateResult::Created if dry_run => println!("   ✅ {label} (would create)"),
        CreateResult::Created => {
            println!("   ✅ {label}");
            if let (true, Some(url)) = (verbose, &result.issue_url) {
                println!("      {url}");
            }
        }
        CreateResult::Failed => {
            println!("   ❌ {label} ({})", result.error.as_deref().unwrap_or("unknown error"));
        }
    }
}
