//! Service context bundling the port trait objects.

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::issues::GhIssueTracker;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::config::Config;
use crate::ports::{FileSystem, IssueTracker};

/// Bundles all port trait objects into a single context.
///
/// Commands only reach the outside world through these fields, so tests can
/// swap in fakes with [`ServiceContext::new`].
pub struct ServiceContext {
    /// Filesystem for reading tasks and companion documents.
    pub fs: Box<dyn FileSystem>,
    /// Issue tracker the issues are created in.
    pub issues: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, issues: Box<dyn IssueTracker>) -> Self {
        Self { fs, issues }
    }

    /// Creates a live context: `std::fs` and the `gh` CLI named in `config`.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            issues: Box::new(GhIssueTracker::new(
                Box::new(LiveShellExecutor),
                config.gh_program.clone(),
            )),
        }
    }
}
