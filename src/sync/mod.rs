//! Match tasks to existing issues and plan what a run creates.
//!
//! Idempotent: re-running does not create duplicates. Issues are matched to
//! tasks by looking for the task ID prefix (`[T001]`) in the title.

use serde::Serialize;

use crate::issue::{feature_title, task_to_issue, FEATURE_TITLE_PREFIX};
use crate::ports::{ExistingIssue, IssueTracker};
use crate::spec_context::SpecContext;
use crate::tasks::Task;

/// Finds the issue whose title starts with `[<task_id>]`.
#[must_use]
pub fn find_existing_issue<'a>(
    task_id: &str,
    issues: &'a [ExistingIssue],
) -> Option<&'a ExistingIssue> {
    let prefix = format!("[{task_id}]");
    issues.iter().find(|issue| issue.title.starts_with(&prefix))
}

/// Finds the feature issue previously created for `spec_name`.
///
/// Accepts the exact generated title (case-insensitively) or a `Feature: `
/// title whose dashed form contains the spec name.
#[must_use]
pub fn find_feature_issue<'a>(
    spec_name: &str,
    issues: &'a [ExistingIssue],
) -> Option<&'a ExistingIssue> {
    let expected = feature_title(spec_name).to_lowercase();
    let slug = spec_name.to_lowercase();
    issues.iter().find(|issue| {
        if !issue.title.starts_with(FEATURE_TITLE_PREFIX) {
            return false;
        }
        let title = issue.title.to_lowercase();
        title == expected || title.replace(' ', "-").contains(&slug)
    })
}

/// Relationship between one task and the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// An open issue exists.
    Synced,
    /// No issue exists yet.
    Missing,
    /// The issue exists but is closed.
    Closed,
    /// The task is done in the document.
    Complete,
}

impl SyncState {
    /// Derives the state; a complete task wins over any issue state.
    #[must_use]
    pub fn of(task: &Task, issue: Option<&ExistingIssue>) -> Self {
        match issue {
            _ if task.is_complete => Self::Complete,
            None => Self::Missing,
            Some(issue) if issue.is_closed() => Self::Closed,
            Some(_) => Self::Synced,
        }
    }

    /// Short label for tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Synced => "✅ Synced",
            Self::Missing => "❌ Missing",
            Self::Closed => "📦 Closed",
            Self::Complete => "✓ Done",
        }
    }
}

/// Sync status of a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSyncStatus {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Derived state.
    pub state: SyncState,
    /// Matching issue number, if any.
    pub issue_number: Option<u64>,
    /// Matching issue URL, if any.
    pub issue_url: Option<String>,
}

/// Sync status of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Number of tasks checked.
    pub total_tasks: usize,
    /// Tasks with an open issue.
    pub synced: usize,
    /// Tasks without an issue.
    pub missing: usize,
    /// Tasks whose issue is closed.
    pub closed: usize,
    /// Tasks done in the document.
    pub complete: usize,
    /// Per-task statuses in document order.
    pub statuses: Vec<TaskSyncStatus>,
}

/// Builds the sync report of `tasks` against `issues`.
#[must_use]
pub fn build_sync_report(tasks: &[Task], issues: &[ExistingIssue]) -> SyncReport {
    let mut report = SyncReport { total_tasks: tasks.len(), ..SyncReport::default() };
    for task in tasks {
        let existing = find_existing_issue(&task.id, issues);
        let state = SyncState::of(task, existing);
        match state {
            SyncState::Synced => report.synced += 1,
            SyncState::Missing => report.missing += 1,
            SyncState::Closed => report.closed += 1,
            SyncState::Complete => report.complete += 1,
        }
        report.statuses.push(TaskSyncStatus {
            task_id: task.id.clone(),
            title: task.title.clone(),
            state,
            issue_number: existing.map(|i| i.number),
            issue_url: existing.map(|i| i.url.clone()),
        });
    }
    report
}

/// What a granular run will do for a single task.
#[derive(Debug, PartialEq)]
pub enum CreateAction<'a> {
    /// A new issue will be created.
    Create(&'a Task),
    /// The task is complete and `--skip-complete` is set.
    SkipComplete(&'a Task),
    /// An issue already exists for the task.
    SkipExists {
        /// The task.
        task: &'a Task,
        /// The matching issue.
        issue: &'a ExistingIssue,
    },
}

/// Plans one action per task, in document order.
///
/// `force` ignores existing issues; `skip_complete` skips tasks that are done.
#[must_use]
pub fn plan_create<'a>(
    tasks: &'a [Task],
    existing: &'a [ExistingIssue],
    skip_complete: bool,
    force: bool,
) -> Vec<CreateAction<'a>> {
    tasks
        .iter()
        .map(|task| {
            if skip_complete && task.is_complete {
                return CreateAction::SkipComplete(task);
            }
            match find_existing_issue(&task.id, existing).filter(|_| !force) {
                Some(issue) => CreateAction::SkipExists { task, issue },
                None => CreateAction::Create(task),
            }
        })
        .collect()
}

/// Outcome of processing one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateResult {
    /// Issue created (or would be, in a dry run).
    Created,
    /// An issue already existed.
    SkippedExists,
    /// The task was complete.
    SkippedComplete,
    /// Creation failed.
    Failed,
}

/// Result of processing a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Outcome.
    pub result: CreateResult,
    /// URL of the created or existing issue.
    pub issue_url: Option<String>,
    /// Existing issue number for skipped tasks.
    pub issue_number: Option<u64>,
    /// Failure message.
    pub error: Option<String>,
}

/// Totals of a granular run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateSummary {
    /// Tasks processed.
    pub total: usize,
    /// Issues created.
    pub created: usize,
    /// Tasks skipped because an issue existed.
    pub skipped_exists: usize,
    /// Tasks skipped because they were complete.
    pub skipped_complete: usize,
    /// Failed creations.
    pub failed: usize,
    /// Per-task results in document order.
    pub results: Vec<TaskResult>,
}

impl CreateSummary {
    fn record(&mut self, result: TaskResult) {
        self.total += 1;
        match result.result {
            CreateResult::Created => self.created += 1,
            CreateResult::SkippedExists => self.skipped_exists += 1,
            CreateResult::SkippedComplete => self.skipped_complete += 1,
            CreateResult::Failed => self.failed += 1,
        }
        self.results.push(result);
    }
}

/// Settings applied to every issue of a granular run.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions<'a> {
    /// Use the Copilot template and assignee.
    pub copilot_mode: bool,
    /// Milestone to set on every issue.
    pub milestone: Option<&'a str>,
    /// Target repository, `None` for the current one.
    pub repo: Option<&'a str>,
    /// Build issues without creating them.
    pub dry_run: bool,
}

/// Executes planned actions against the tracker.
///
/// A failed creation is recorded as [`CreateResult::Failed`] and does not
/// stop the run. `on_result` sees every result as soon as it is known.
pub fn execute_create(
    tracker: &dyn IssueTracker,
    actions: &[CreateAction<'_>],
    options: &CreateOptions<'_>,
    context: Option<&SpecContext>,
    mut on_result: impl FnMut(&TaskResult),
) -> CreateSummary {
    let mut summary = CreateSummary::default();
    for action in actions {
        let (task, result) = match action {
            CreateAction::SkipComplete(task) => (task, Outcome::SkippedComplete),
            CreateAction::SkipExists { task, issue } => (task, Outcome::SkippedExists(*issue)),
            CreateAction::Create(task) => {
                let mut issue = task_to_issue(task, options.copilot_mode, context);
                issue.milestone = options.milestone.map(str::to_string);
                if options.dry_run {
                    (task, Outcome::WouldCreate)
                } else {
                    match tracker.create_issue(&issue, options.repo) {
                        Ok(url) => (task, Outcome::Created(url)),
                        Err(e) => {
                            tracing::warn!(task = %task.id, error = %e, "issue creation failed");
                            (task, Outcome::Failed(e.to_string()))
                        }
                    }
                }
            }
        };
        let result = result.into_task_result(task);
        on_result(&result);
        summary.record(result);
    }
    summary
}

enum Outcome<'a> {
    Created(String),
    WouldCreate,
    SkippedExists(&'a ExistingIssue),
    SkippedComplete,
    Failed(String),
}

impl Outcome<'_> {
    fn into_task_result(self, task: &Task) -> TaskResult {
        let mut result = TaskResult {
            task_id: task.id.clone(),
            title: task.title.clone(),
            result: CreateResult::Created,
            issue_url: None,
            issue_number: None,
            error: None,
        };
        match self {
            Self::Created(url) => result.issue_url = Some(url),
            Self::WouldCreate => {}
            Self::SkippedExists(issue) => {
                result.result = CreateResult::SkippedExists;
                result.issue_url = Some(issue.url.clone());
                result.issue_number = Some(issue.number);
            }
            Self::SkippedComplete => result.result = CreateResult::SkippedComplete,
            Self::Failed(error) => {
                result.result = CreateResult::Failed;
                result.error = Some(error);
            }
        }
        result
    }
}
