//! Error types shared by the parser, the context reader and the tracker adapters.

use std::path::PathBuf;

/// Errors raised while turning a tasks document into issues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tasks document does not exist.
    #[error("Tasks file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The document (or one task block in it) could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// Reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying failure reported by the filesystem port.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The `gh` binary is missing or could not be run.
    #[error("{0}")]
    GhCli(String),

    /// `gh` is installed but not logged in.
    #[error("Not logged in to GitHub. Run 'gh auth login' to authenticate.")]
    Authentication,

    /// The repository could not be determined or accessed.
    #[error("{0}")]
    Repository(String),

    /// GitHub rejected the call because of rate limiting.
    #[error("GitHub API rate limit exceeded. Wait a few minutes and try again.")]
    RateLimit,

    /// `gh issue create` failed for another reason.
    #[error("Failed to create issue: {0}")]
    IssueCreation(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create a parse error from any message.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create an I/O error for `path`.
    pub fn io(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Io { path: path.into(), source: source.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_path() {
        let err = Error::NotFound(PathBuf::from("specs/001-x/tasks.md"));
        assert_eq!(err.to_string(), "Tasks file not found: specs/001-x/tasks.md");
    }

    #[test]
    fn parse_error_is_the_bare_message() {
        let err = Error::parse("No tasks found in tasks.md");
        assert_eq!(err.to_string(), "No tasks found in tasks.md");
    }

    #[test]
    fn io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io("plan.md", source);
        assert!(err.to_string().contains("plan.md"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
