//! Issue tracker port for managing GitHub issues.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An issue that already exists in the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingIssue {
    /// The issue number.
    pub number: u64,
    /// The issue title.
    pub title: String,
    /// `open` or `closed`, lower-cased.
    #[serde(default = "default_state")]
    pub state: String,
    /// Web URL of the issue.
    #[serde(default)]
    pub url: String,
}

fn default_state() -> String {
    "open".to_string()
}

impl ExistingIssue {
    /// Returns `true` when the issue has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.eq_ignore_ascii_case("closed")
    }
}

/// An issue to be created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Labels to attach.
    pub labels: Vec<String>,
    /// Login to assign. `copilot` selects the Copilot coding agent.
    pub assignee: Option<String>,
    /// Milestone name.
    pub milestone: Option<String>,
}

/// Manages issues in an external tracker.
///
/// Abstracting issue tracking lets the commands run against an in-memory
/// tracker in tests without touching GitHub.
pub trait IssueTracker: Send + Sync {
    /// Returns `true` if the tracker's command-line tool is installed.
    fn check_available(&self) -> bool;

    /// Confirms the user is logged in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Authentication`] when not logged in.
    fn check_authenticated(&self) -> Result<()>;

    /// Returns the current repository in `owner/repo` form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Repository`] if the working directory has no
    /// GitHub remote.
    fn current_repo(&self) -> Result<String>;

    /// Lists up to `limit` issues in any state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RateLimit`] when rate limited.
    fn list_issues(&self, repo: Option<&str>, limit: usize) -> Result<Vec<ExistingIssue>>;

    /// Creates an issue and returns its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker rejects the issue.
    fn create_issue(&self, issue: &NewIssue, repo: Option<&str>) -> Result<String>;

    /// Creates or updates a label. Returns `false` if that failed.
    fn ensure_label(&self, name: &str, color: &str, repo: Option<&str>) -> bool;
}
