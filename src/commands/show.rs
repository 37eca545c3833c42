//! `speckit-to-issue show` command.

use std::path::Path;

use serde::Serialize;

use super::describe;
use crate::service::ServiceContext;
use crate::spec_context::{read_spec_context, SpecContext};
use crate::tasks::{ParseResult, Task};

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    result: &'a ParseResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a SpecContext>,
}

/// Execute the `show` command.
///
/// Parses the tasks file and prints tasks grouped by phase, or the whole
/// parse result as JSON with `--json`. Never contacts the tracker.
///
/// # Errors
///
/// Returns an error string if the tasks file cannot be read or parsed.
pub fn run(
    ctx: &ServiceContext,
    tasks_file: &Path,
    json: bool,
    no_context: bool,
) -> Result<(), String> {
    let result =
        crate::tasks::parse_tasks_file(ctx.fs.as_ref(), tasks_file).map_err(|e| describe(&e))?;
    let context = (!no_context).then(|| read_spec_context(ctx.fs.as_ref(), tasks_file));

    if json {
        let output = ShowOutput { result: &result, context: context.as_ref() };
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to serialize parse result: {e}"))?;
        println!("{rendered}");
        return Ok(());
    }

    print_result(&result);
    if let Some(context) = &context {
        print_context(context);
    }
    Ok(())
}

fn print_result(result: &ParseResult) {
    println!("Spec: {}", result.spec_name);
    println!(
        "Tasks: {} ({} complete, {} incomplete)",
        result.tasks.len(),
        result.complete_count(),
        result.incomplete_count()
    );

    for (phase, tasks) in result.phase_groups() {
        println!();
        println!("{}", if phase.is_empty() { "Ungrouped" } else { phase });
        for task in tasks {
            print_task(task);
        }
    }

    if !result.errors.is_empty() {
        println!("\nWarnings:");
        for err in &result.errors {
            println!("  {}", err.lines().next().unwrap_or_default());
        }
    }
}

fn print_task(task: &Task) {
    let mark = if task.is_complete { "x" } else { " " };
    println!("  [{mark}] {} {} ({}, {})", task.id, task.title, task.priority, task.estimate);
    if task.dependencies != "None" {
        println!("        depends on: {}", task.dependencies);
    }
    if let Some(file) = &task.file_path {
        println!("        file: {file}");
    }
    for criterion in &task.acceptance_criteria {
        let check = if criterion.checked { "x" } else { " " };
        println!("        - [{check}] {}", criterion.text);
    }
}

fn print_context(context: &SpecContext) {
    println!();
    if context.is_empty() {
        println!("Spec context: none found in {}", context.spec_folder);
    } else {
        println!("Spec context: {}", context.files_found.join(", "));
        print!("{}", context.to_markdown());
    }
    for warning in &context.extraction_warnings {
        println!("  warning: {warning}");
    }
}
