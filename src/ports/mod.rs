//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the parsing core and an
//! external system (filesystem, child processes, the issue tracker).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod issues;
pub mod shell;

pub use filesystem::FileSystem;
pub use issues::{ExistingIssue, IssueTracker, NewIssue};
pub use shell::{ShellExecutor, ShellOutput};
