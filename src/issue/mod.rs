//! Turning parsed tasks into issues: per-task, feature-level, and labels.

pub mod feature;
pub mod labels;
pub mod mapper;

pub use feature::{build_feature_issue, feature_title, FeatureIssueBuilder, FEATURE_TITLE_PREFIX};
pub use labels::{ensure_labels, feature_labels, label_color, labels_for_tasks};
pub use mapper::{build_issue_body, format_acceptance_criteria, get_labels_for_task, task_to_issue};
