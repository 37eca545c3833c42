//! Maps a single task to the issue that tracks it.

use std::fmt::Write;

use crate::ports::NewIssue;
use crate::spec_context::SpecContext;
use crate::tasks::{Criterion, Task};

/// Assignee that routes an issue to the Copilot coding agent.
pub const COPILOT_ASSIGNEE: &str = "copilot";

/// Renders criteria as a markdown checklist.
#[must_use]
pub fn format_acceptance_criteria(criteria: &[Criterion]) -> String {
    if criteria.is_empty() {
        return "_No acceptance criteria defined._".to_string();
    }
    criteria
        .iter()
        .map(|c| format!("- [{}] {}", if c.checked { "x" } else { " " }, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn standard_body(task: &Task) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "## Task: {}\n", task.id);
    let _ = writeln!(body, "{}\n", task.title);

    body.push_str("| Field | Value |\n|-------|-------|\n");
    let _ = writeln!(body, "| **Spec** | `{}` |", task.spec_name);
    if !task.phase.is_empty() {
        let _ = writeln!(body, "| **Phase** | {} |", task.phase);
    }
    let _ = writeln!(body, "| **Priority** | {} |", task.priority);
    let _ = writeln!(body, "| **Estimate** | {} |", task.estimate);
    let _ = writeln!(body, "| **Dependencies** | {} |", task.dependencies);
    if let Some(file) = &task.file_path {
        let _ = writeln!(body, "| **File** | `{file}` |");
    }
    if let Some(fr) = &task.fr_refs {
        let _ = writeln!(body, "| **FR** | {fr} |");
    }
    if let Some(nfr) = &task.nfr_refs {
        let _ = writeln!(body, "| **NFR** | {nfr} |");
    }

    let _ = write!(
        body,
        "\n## Acceptance Criteria\n\n{}\n",
        format_acceptance_criteria(&task.acceptance_criteria)
    );
    body
}

fn copilot_body(task: &Task) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "## Objective\n\n{}\n", task.title);

    body.push_str("## Context\n\n");
    let _ = writeln!(body, "- **Task:** {}", task.id);
    let _ = writeln!(body, "- **Spec:** `{}`", task.spec_name);
    if !task.phase.is_empty() {
        let _ = writeln!(body, "- **Phase:** {}", task.phase);
    }
    let _ = writeln!(body, "- **Priority:** {}", task.priority);
    let _ = writeln!(body, "- **Dependencies:** {}", task.dependencies);

    let files = task.files();
    if !files.is_empty() {
        body.push_str("\n## Files to Modify\n\n");
        for file in files {
            let _ = writeln!(body, "- `{file}`");
        }
    }

    let _ = write!(
        body,
        "\n## Acceptance Criteria\n\n{}\n",
        format_acceptance_criteria(&task.acceptance_criteria)
    );
    body
}

const COPILOT_INSTRUCTIONS: &str = "## Instructions for Copilot

1. Implement only what this task describes.
2. Satisfy every acceptance criterion above.
3. Follow the existing code style and patterns in the repository.
4. Add or update tests where applicable.
5. Open a single pull request that references this issue.";

/// Builds the issue body for `task`.
///
/// `copilot_mode` switches to the agent-oriented template. A non-empty
/// `context` is appended as a `## Spec Context` block.
#[must_use]
pub fn build_issue_body(task: &Task, copilot_mode: bool, context: Option<&SpecContext>) -> String {
    let mut body = if copilot_mode { copilot_body(task) } else { standard_body(task) };

    if let Some(ctx) = context.filter(|ctx| !ctx.is_empty()) {
        let _ = write!(body, "\n{}", ctx.to_markdown());
    }
    if copilot_mode {
        let _ = write!(body, "\n{COPILOT_INSTRUCTIONS}\n");
    }
    let _ = write!(body, "\n---\n*Generated by speckit-to-issue from `{}`*\n", task.spec_name);
    body
}

/// Labels applied to the issue for `task`.
#[must_use]
pub fn get_labels_for_task(task: &Task) -> Vec<String> {
    let mut labels =
        vec!["task".to_string(), "speckit".to_string(), task.priority.label().to_string()];
    labels.extend(task.phase_label());
    if !task.spec_name.is_empty() {
        labels.push(task.spec_label());
    }
    labels
}

/// Converts a task into a ready-to-create issue.
#[must_use]
pub fn task_to_issue(task: &Task, copilot_mode: bool, context: Option<&SpecContext>) -> NewIssue {
    NewIssue {
        title: task.full_title(),
        body: build_issue_body(task, copilot_mode, context),
        labels: get_labels_for_task(task),
        assignee: copilot_mode.then(|| COPILOT_ASSIGNEE.to_string()),
        milestone: None,
    }
}
