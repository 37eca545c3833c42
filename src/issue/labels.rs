//! Label palette and the label sets a run needs on the tracker.

use std::collections::BTreeSet;

use super::mapper::get_labels_for_task;
use crate::ports::IssueTracker;
use crate::tasks::{Priority, Task};

/// Hex color (without `#`) used when creating `label`.
#[must_use]
pub fn label_color(label: &str) -> &'static str {
    match label {
        "task" => "1D76DB",
        "speckit" => "5319E7",
        "feature" => "0E8A16",
        "priority:high" => "B60205",
        "priority:medium" => "FBCA04",
        "priority:low" => "C2E0C6",
        "priority:wont" => "EEEEEE",
        l if l.starts_with("phase-") => "BFD4F2",
        l if l.starts_with("spec:") => "D4C5F9",
        _ => "EDEDED",
    }
}

/// The highest priority present among `tasks`, ignoring `Won't`.
#[must_use]
pub fn highest_priority(tasks: &[Task]) -> Option<Priority> {
    tasks.iter().map(|t| t.priority).filter(|p| *p != Priority::Wont).min()
}

/// Labels of a feature issue for `spec_name`.
#[must_use]
pub fn feature_labels(spec_name: &str, tasks: &[Task]) -> Vec<String> {
    let mut labels = vec!["feature".to_string(), "speckit".to_string()];
    if !spec_name.is_empty() {
        labels.push(format!("spec:{spec_name}"));
    }
    if let Some(priority) = highest_priority(tasks) {
        labels.push(priority.label().to_string());
    }
    labels
}

/// Union of the per-task labels, sorted.
#[must_use]
pub fn labels_for_tasks(tasks: &[Task]) -> BTreeSet<String> {
    tasks.iter().flat_map(get_labels_for_task).collect()
}

/// Creates or updates every label on the tracker.
///
/// Best effort: returns the labels that could not be ensured.
pub fn ensure_labels<'a>(
    tracker: &dyn IssueTracker,
    labels: impl IntoIterator<Item = &'a String>,
    repo: Option<&str>,
) -> Vec<String> {
    labels
        .into_iter()
        .filter(|label| {
            let ok = tracker.ensure_label(label, label_color(label), repo);
            if !ok {
                tracing::warn!(%label, "could not ensure label");
            }
            !ok
        })
        .cloned()
        .collect()
}
