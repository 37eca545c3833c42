//! Live adapter for the `IssueTracker` port backed by the GitHub CLI.

use crate::error::{Error, Result};
use crate::ports::{ExistingIssue, IssueTracker, NewIssue, ShellExecutor, ShellOutput};

const NOT_INSTALLED: &str =
    "GitHub CLI (gh) is not installed. Install from https://cli.github.com";

/// Bot login the Copilot coding agent is assigned through.
const COPILOT_BOT: &str = "copilot-swe-agent[bot]";

/// Issue tracker that shells out to `gh`.
pub struct GhIssueTracker {
    shell: Box<dyn ShellExecutor>,
    program: String,
}

impl GhIssueTracker {
    /// Creates a tracker that runs `program` (normally `gh`) through `shell`.
    #[must_use]
    pub fn new(shell: Box<dyn ShellExecutor>, program: impl Into<String>) -> Self {
        Self { shell, program: program.into() }
    }

    fn gh(&self, args: &[&str]) -> Result<ShellOutput> {
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        self.gh_owned(&args)
    }

    fn gh_owned(&self, args: &[String]) -> Result<ShellOutput> {
        self.shell.run(&self.program, args).map_err(|e| {
            match e.downcast_ref::<std::io::Error>() {
                Some(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    Error::GhCli(NOT_INSTALLED.to_string())
                }
                _ => Error::GhCli(format!("failed to run {}: {e}", self.program)),
            }
        })
    }

    /// Assigns the Copilot coding agent through the REST API.
    ///
    /// `gh issue create --assignee` does not accept the bot login, so this
    /// posts to the assignees endpoint instead. Best effort.
    fn assign_to_copilot(&self, issue_url: &str, repo: Option<&str>) -> bool {
        let Some((prefix, number)) = issue_url.trim_end_matches('/').rsplit_once("/issues/")
        else {
            return false;
        };
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        let repo = match repo {
            Some(r) => r.to_string(),
            None => match prefix.split_once("github.com/") {
                Some((_, r)) if r.contains('/') => r.to_string(),
                _ => return false,
            },
        };

        let args = vec![
            "api".to_string(),
            "--method".to_string(),
            "POST".to_string(),
            "-H".to_string(),
            "Accept: application/vnd.github+json".to_string(),
            "-H".to_string(),
            "X-GitHub-Api-Version: 2022-11-28".to_string(),
            format!("/repos/{repo}/issues/{number}/assignees"),
            "-f".to_string(),
            format!("assignees[]={COPILOT_BOT}"),
        ];
        match self.gh_owned(&args) {
            Ok(out) if out.success() => true,
            Ok(out) => {
                tracing::warn!(stderr = %out.stderr.trim(), "copilot assignment failed");
                false
            }
            Err(e) => {
                tracing::warn!("copilot assignment failed: {e}");
                false
            }
        }
    }
}

fn is_rate_limited(stderr: &str) -> bool {
    stderr.to_lowercase().contains("rate limit")
}

impl IssueTracker for GhIssueTracker {
    fn check_available(&self) -> bool {
        self.gh(&["--version"]).is_ok_and(|out| out.success())
    }

    fn check_authenticated(&self) -> Result<()> {
        let out = self.gh(&["auth", "status"])?;
        if out.success() {
            Ok(())
        } else {
            Err(Error::Authentication)
        }
    }

    fn current_repo(&self) -> Result<String> {
        let out = self.gh(&["repo", "view", "--json", "nameWithOwner", "-q", ".nameWithOwner"])?;
        if !out.success() {
            return Err(Error::Repository(
                "Could not determine repository. \
                 Make sure you're in a git repository with a GitHub remote."
                    .to_string(),
            ));
        }
        Ok(out.stdout.trim().to_string())
    }

    fn list_issues(&self, repo: Option<&str>, limit: usize) -> Result<Vec<ExistingIssue>> {
        let mut args = vec![
            "issue".to_string(),
            "list".to_string(),
            "--json".to_string(),
            "number,title,state,url".to_string(),
            "--limit".to_string(),
            limit.to_string(),
            "--state".to_string(),
            "all".to_string(),
        ];
        if let Some(repo) = repo {
            args.push("--repo".to_string());
            args.push(repo.to_string());
        }

        let out = self.gh_owned(&args)?;
        if !out.success() {
            if is_rate_limited(&out.stderr) {
                return Err(Error::RateLimit);
            }
            tracing::warn!(stderr = %out.stderr.trim(), "gh issue list failed");
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<ExistingIssue>>(&out.stdout) {
            Ok(mut issues) => {
                for issue in &mut issues {
                    issue.state = issue.state.to_lowercase();
                }
                Ok(issues)
            }
            Err(e) => {
                tracing::warn!("could not decode gh issue list output: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn create_issue(&self, issue: &NewIssue, repo: Option<&str>) -> Result<String> {
        let assign_copilot = issue.assignee.as_deref() == Some("copilot");

        let mut args = vec![
            "issue".to_string(),
            "create".to_string(),
            "--title".to_string(),
            issue.title.clone(),
            "--body".to_string(),
            issue.body.clone(),
        ];
        for label in &issue.labels {
            args.push("--label".to_string());
            args.push(label.clone());
        }
        if let Some(assignee) = issue.assignee.as_deref().filter(|_| !assign_copilot) {
            args.push("--assignee".to_string());
            args.push(assignee.to_string());
        }
        if let Some(milestone) = &issue.milestone {
            args.push("--milestone".to_string());
            args.push(milestone.clone());
        }
        if let Some(repo) = repo {
            args.push("--repo".to_string());
            args.push(repo.to_string());
        }

        let out = self.gh_owned(&args)?;
        if !out.success() {
            let stderr = out.stderr.to_lowercase();
            if is_rate_limited(&stderr) {
                return Err(Error::RateLimit);
            }
            if stderr.contains("not found") || stderr.contains("could not resolve") {
                return Err(Error::Repository(format!(
                    "Repository not found: {}",
                    repo.unwrap_or("(current)")
                )));
            }
            return Err(Error::IssueCreation(out.stderr.trim().to_string()));
        }

        let url = out.stdout.trim().to_string();
        if assign_copilot && !url.is_empty() && !self.assign_to_copilot(&url, repo) {
            tracing::warn!(%url, "issue created but could not be assigned to Copilot");
        }
        Ok(url)
    }

    fn ensure_label(&self, name: &str, color: &str, repo: Option<&str>) -> bool {
        let mut args = vec![
            "label".to_string(),
            "create".to_string(),
            name.to_string(),
            "--color".to_string(),
            color.to_string(),
            "--force".to_string(),
        ];
        if let Some(repo) = repo {
            args.push("--repo".to_string());
            args.push(repo.to_string());
        }
        self.gh_owned(&args).is_ok_and(|out| out.success())
    }
}
