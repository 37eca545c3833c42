//! Runtime configuration: defaults, an optional YAML file, then environment.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the optional configuration file in the working directory.
pub const CONFIG_FILE: &str = ".speckit-to-issue.yaml";

/// Default number of issues fetched when looking for duplicates.
pub const DEFAULT_ISSUE_LIMIT: usize = 1000;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target repository (`owner/repo`); `None` uses the current one.
    pub repo: Option<String>,
    /// Maximum number of existing issues to fetch.
    pub issue_limit: usize,
    /// Program used to talk to GitHub.
    pub gh_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { repo: None, issue_limit: DEFAULT_ISSUE_LIMIT, gh_program: "gh".to_string() }
    }
}

impl Config {
    /// Loads configuration from `dir/.speckit-to-issue.yaml` (if present),
    /// then the process environment (after loading `.env`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is malformed or an environment
    /// value cannot be parsed.
    pub fn load(dir: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::from_file(&dir.join(CONFIG_FILE))?;
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Reads the YAML file at `path`, or returns defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parses YAML configuration. An empty document yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Applies `SPECKIT_REPO`, `SPECKIT_ISSUE_LIMIT` and `SPECKIT_GH`
    /// looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `SPECKIT_ISSUE_LIMIT` is not a number.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(repo) = lookup("SPECKIT_REPO").filter(|r| !r.trim().is_empty()) {
            self.repo = Some(repo.trim().to_string());
        }
        if let Some(limit) = lookup("SPECKIT_ISSUE_LIMIT") {
            self.issue_limit = limit.trim().parse().map_err(|_| {
                Error::Config(format!("SPECKIT_ISSUE_LIMIT must be a number, got {limit:?}"))
            })?;
        }
        if let Some(program) = lookup("SPECKIT_GH").filter(|p| !p.trim().is_empty()) {
            self.gh_program = program.trim().to_string();
        }
        Ok(self)
    }

    /// Lets a `--repo` flag override every other source.
    #[must_use]
    pub fn with_repo_flag(mut self, repo: Option<&str>) -> Self {
        if let Some(repo) = repo {
            self.repo = Some(repo.to_string());
        }
        self
    }
}
