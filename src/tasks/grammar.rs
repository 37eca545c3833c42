//! Line matchers for the tasks document convention.
//!
//! Every recognised line shape has its own matcher returning `Option`, so a
//! missing or malformed field never affects the others.

use std::sync::LazyLock;

use regex::Regex;

use super::model::Criterion;

/// Glyph that marks a task as done on its header line.
pub const COMPLETE_MARKER: char = '✅';

static TASK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### (T\d+): (.+)$").expect("task header pattern"));

static TASK_HEADER_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+T\d+").expect("task candidate pattern"));

static PHASE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## (Phase \d+: .+)$").expect("phase header pattern"));

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*\*\*([A-Za-z]+):\*\*\s*(.+?)\s*$").expect("field pattern")
});

static CRITERION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\[([ xX])\]\s*(.+?)\s*$").expect("criterion pattern"));

/// A bold-labelled field inside a task block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `- **Priority:** Must`
    Priority,
    /// `- **Estimate:** 10 min`
    Estimate,
    /// `- **Dependencies:** T001, T002`
    Dependencies,
    /// ``- **File:** `src/main.rs` ``
    File,
    /// `- **FR:** FR-001`
    Fr,
    /// `- **NFR:** NFR-002`
    Nfr,
}

impl Field {
    /// The label as written between the `**` markers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Estimate => "Estimate",
            Self::Dependencies => "Dependencies",
            Self::File => "File",
            Self::Fr => "FR",
            Self::Nfr => "NFR",
        }
    }
}

/// A matched `### T001: Title` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHeader {
    /// Task identifier.
    pub id: String,
    /// Title with the completion marker removed.
    pub title: String,
    /// The completion marker appeared on the line.
    pub complete: bool,
}

/// Matches a well-formed task header. The title must be non-empty once the
/// completion marker is removed.
#[must_use]
pub fn match_task_header(line: &str) -> Option<TaskHeader> {
    let caps = TASK_HEADER.captures(line)?;
    let title = caps[2].trim().trim_end_matches(COMPLETE_MARKER).trim_end();
    if title.is_empty() {
        return None;
    }
    Some(TaskHeader {
        id: caps[1].to_string(),
        title: title.to_string(),
        complete: line.contains(COMPLETE_MARKER),
    })
}

/// Matches any line that starts a task block, well-formed or not.
///
/// Used to cut the document into spans; the block parser then applies
/// [`match_task_header`] and reports spans whose header is malformed.
#[must_use]
pub fn is_task_header_candidate(line: &str) -> bool {
    TASK_HEADER_CANDIDATE.is_match(line)
}

/// Matches `## Phase <n>: <text>` and returns the line without `## `.
#[must_use]
pub fn match_phase_header(line: &str) -> Option<&str> {
    PHASE_HEADER.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str().trim_end())
}

/// Matches `- **<Label>:** <value>` for the given field and returns the value.
#[must_use]
pub fn match_field(line: &str, field: Field) -> Option<String> {
    let caps = FIELD.captures(line)?;
    if &caps[1] != field.label() {
        return None;
    }
    let value = caps[2].trim();
    let value = match field {
        Field::File => value.trim_matches('`').trim(),
        _ => value,
    };
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Matches a `- [ ] text` or `- [x] text` checklist line.
#[must_use]
pub fn match_criterion(line: &str) -> Option<Criterion> {
    let caps = CRITERION.captures(line)?;
    let text = caps[2].trim();
    if text.is_empty() {
        return None;
    }
    Some(Criterion { text: text.to_string(), checked: caps[1].eq_ignore_ascii_case("x") })
}
