//! Builds one feature-level issue covering a whole tasks document.

use std::collections::BTreeSet;
use std::fmt::Write;

use super::labels::feature_labels;
use super::mapper::COPILOT_ASSIGNEE;
use crate::ports::NewIssue;
use crate::spec_context::SpecContext;
use crate::tasks::{phase_number, Task};

/// Title prefix of every feature issue.
pub const FEATURE_TITLE_PREFIX: &str = "Feature: ";

const UNGROUPED: &str = "Ungrouped";

const COPILOT_INSTRUCTIONS: &str = "## Instructions for Copilot

Implement this feature by completing the tasks in order by phase.

1. **Work through phases sequentially** - Complete all tasks in Phase 1 before moving to Phase 2
2. **Check off tasks** - Mark each task complete as you finish it
3. **Follow existing patterns** - Match the code style and patterns in the repository
4. **Test your changes** - Add appropriate tests if applicable
5. **Single PR** - Create one pull request with all changes when complete

Use the architecture section above for guidance on structure and key decisions.";

const FOOTER: &str = "---\n*Generated by speckit-to-issue*";

/// `Feature: Help Faq Page` for `003-help-faq-page`.
#[must_use]
pub fn feature_title(spec_name: &str) -> String {
    let digits = spec_name.bytes().take_while(u8::is_ascii_digit).count();
    let name = match spec_name[digits..].strip_prefix('-') {
        Some(rest) if digits > 0 => rest,
        _ => spec_name,
    };
    let words: Vec<String> = name
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect();
    format!("{FEATURE_TITLE_PREFIX}{}", words.join(" "))
}

/// Assembles the feature issue for one spec.
#[derive(Debug, Clone)]
pub struct FeatureIssueBuilder {
    spec_name: String,
    copilot_mode: bool,
}

impl FeatureIssueBuilder {
    /// Creates a builder for `spec_name`.
    #[must_use]
    pub fn new(spec_name: impl Into<String>, copilot_mode: bool) -> Self {
        Self { spec_name: spec_name.into(), copilot_mode }
    }

    /// Builds the issue from the optional context and every task.
    #[must_use]
    pub fn build(&self, context: Option<&SpecContext>, tasks: &[Task]) -> NewIssue {
        let mut sections = vec![self.overview_section(context)];
        sections.extend(context.and_then(architecture_section));
        sections.push(tasks_by_phase_section(tasks));
        sections.extend(files_section(tasks));
        if self.copilot_mode {
            sections.push(COPILOT_INSTRUCTIONS.to_string());
        }
        sections.push(FOOTER.to_string());

        NewIssue {
            title: feature_title(&self.spec_name),
            body: sections.join("\n\n"),
            labels: feature_labels(&self.spec_name, tasks),
            assignee: self.copilot_mode.then(|| COPILOT_ASSIGNEE.to_string()),
            milestone: None,
        }
    }

    fn overview_section(&self, context: Option<&SpecContext>) -> String {
        let mut out = String::from("## Overview\n\n");
        match context.and_then(|c| c.feature_overview.as_deref()) {
            Some(overview) => out.push_str(overview),
            None => {
                let _ = write!(out, "Implementation of the {} feature.", self.spec_name);
            }
        }
        if let Some(criteria) = context.and_then(|c| c.success_criteria.as_deref()) {
            let _ = write!(out, "\n\n### Success Criteria\n\n{criteria}");
        }
        out
    }
}

/// `## Architecture` from target state, key decisions and the overview.
///
/// The architecture overview is only used when no target state exists.
fn architecture_section(context: &SpecContext) -> Option<String> {
    let target = context.target_state.as_deref();
    let decisions = context.key_decisions.as_deref();
    let overview = context.architecture_overview.as_deref();
    if target.is_none() && decisions.is_none() && overview.is_none() {
        return None;
    }

    let mut out = String::from("## Architecture");
    if let Some(target) = target {
        let _ = write!(out, "\n\n### Target State\n\n{target}");
    }
    if let Some(decisions) = decisions {
        let _ = write!(out, "\n\n### Key Decisions\n\n{decisions}");
    }
    if let (Some(overview), None) = (overview, target) {
        let _ = write!(out, "\n\n{overview}");
    }
    Some(out)
}

/// Phase names sorted by phase number, unnumbered phases (and `Ungrouped`) last.
fn sorted_phases(tasks: &[Task]) -> Vec<(&str, Vec<&Task>)> {
    let mut groups: Vec<(&str, Vec<&Task>)> = Vec::new();
    for task in tasks {
        let phase = if task.phase.is_empty() { UNGROUPED } else { task.phase.as_str() };
        match groups.iter_mut().find(|(name, _)| *name == phase) {
            Some((_, members)) => members.push(task),
            None => groups.push((phase, vec![task])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| {
        let key = |name: &str| phase_number(name).unwrap_or(u32::MAX);
        key(a).cmp(&key(b)).then_with(|| a.cmp(b))
    });
    groups
}

fn tasks_by_phase_section(tasks: &[Task]) -> String {
    let mut out = String::from("## Implementation Tasks");
    for (phase, members) in sorted_phases(tasks) {
        let _ = write!(out, "\n\n### {phase}\n");
        for task in members {
            let checkbox = if task.is_complete { "x" } else { " " };
            let _ = write!(
                out,
                "\n- [{checkbox}] **{}**: {} ({})",
                task.id, task.title, task.estimate
            );
            for criterion in &task.acceptance_criteria {
                let _ = write!(out, "\n  - {}", criterion.text);
            }
            if let Some(file) = &task.file_path {
                let _ = write!(out, "\n  - 📁 `{file}`");
            }
        }
    }
    out
}

fn files_section(tasks: &[Task]) -> Option<String> {
    let files: BTreeSet<&str> = tasks.iter().flat_map(Task::files).collect();
    if files.is_empty() {
        return None;
    }
    let mut out = String::from("## Files to Modify\n");
    for file in files {
        let _ = write!(out, "\n- `{file}`");
    }
    Some(out)
}

/// Builds the feature issue for `spec_name` in one call.
#[must_use]
pub fn build_feature_issue(
    spec_name: &str,
    context: Option<&SpecContext>,
    tasks: &[Task],
    copilot_mode: bool,
) -> NewIssue {
    FeatureIssueBuilder::new(spec_name, copilot_mode).build(context, tasks)
}
