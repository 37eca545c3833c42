//! Task, priority and parse-result types.

use std::fmt;

use serde::Serialize;

/// MoSCoW priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must have.
    Must,
    /// Should have. The fallback for unrecognised input.
    #[default]
    Should,
    /// Could have.
    Could,
    /// Won't have this time.
    Wont,
}

impl Priority {
    /// Parses a priority label from the leading word of `value`, so
    /// annotations such as `Must (P1)` are ignored. Never fails: anything
    /// unrecognised, including an empty string, is [`Priority::Should`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let word: String = value
            .trim_start()
            .chars()
            .take_while(|c| c.is_alphanumeric() || matches!(c, '\'' | '\u{2019}'))
            .collect();
        match word.to_lowercase().as_str() {
            "must" => Self::Must,
            "could" => Self::Could,
            "won't" | "wont" | "won\u{2019}t" => Self::Wont,
            _ => Self::Should,
        }
    }

    /// The `priority:*` label used on issues.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Must => "priority:high",
            Self::Should => "priority:medium",
            Self::Could => "priority:low",
            Self::Wont => "priority:wont",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Must => "Must",
            Self::Should => "Should",
            Self::Could => "Could",
            Self::Wont => "Won't",
        })
    }
}

/// One acceptance-criterion checklist line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Trimmed criterion text.
    pub text: String,
    /// Whether the checkbox was ticked.
    pub checked: bool,
}

/// A task parsed from a `### T001: ...` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Task identifier, e.g. `T001`.
    pub id: String,
    /// Task title without the completion marker.
    pub title: String,
    /// Parsed priority.
    pub priority: Priority,
    /// Effort estimate, `Unknown` when absent.
    pub estimate: String,
    /// Dependency references, `None` when absent.
    pub dependencies: String,
    /// File path reference, possibly a comma-separated list.
    pub file_path: Option<String>,
    /// Functional requirement references.
    pub fr_refs: Option<String>,
    /// Non-functional requirement references.
    pub nfr_refs: Option<String>,
    /// Enclosing phase name, empty when ungrouped.
    pub phase: String,
    /// Spec the task belongs to, e.g. `002-weather-frontend`.
    pub spec_name: String,
    /// Acceptance criteria in document order.
    pub acceptance_criteria: Vec<Criterion>,
    /// Marked done on the header or every criterion is checked.
    pub is_complete: bool,
}

impl Task {
    /// Issue title, `[T001] Title`.
    #[must_use]
    pub fn full_title(&self) -> String {
        format!("[{}] {}", self.id, self.title)
    }

    /// `phase-<n>` for tasks under a `Phase <n>` header.
    #[must_use]
    pub fn phase_label(&self) -> Option<String> {
        phase_number(&self.phase).map(|n| format!("phase-{n}"))
    }

    /// `spec:<spec_name>`.
    #[must_use]
    pub fn spec_label(&self) -> String {
        format!("spec:{}", self.spec_name)
    }

    /// The individual paths of a comma-separated `File` field.
    #[must_use]
    pub fn files(&self) -> Vec<&str> {
        self.file_path
            .as_deref()
            .map(|f| {
                f.split(',')
                    .map(|item| item.trim().trim_matches('`').trim())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Number following `Phase ` in a phase name.
#[must_use]
pub fn phase_number(phase: &str) -> Option<u32> {
    let rest = &phase[phase.find("Phase ")? + "Phase ".len()..];
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Result of parsing a tasks document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Spec name derived from the document path.
    pub spec_name: String,
    /// Tasks in document order.
    pub tasks: Vec<Task>,
    /// Phase names in document order.
    pub phases: Vec<String>,
    /// Non-fatal warnings, one per task block that failed to parse.
    pub errors: Vec<String>,
}

impl ParseResult {
    /// Number of completed tasks.
    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_complete).count()
    }

    /// Number of tasks still open.
    #[must_use]
    pub fn incomplete_count(&self) -> usize {
        self.tasks.len() - self.complete_count()
    }

    /// Task ids grouped by phase, phases in order of first appearance.
    ///
    /// Ungrouped tasks are collected under the empty phase name.
    #[must_use]
    pub fn tasks_by_phase(&self) -> Vec<(String, Vec<String>)> {
        self.phase_groups()
            .into_iter()
            .map(|(phase, tasks)| {
                (phase.to_string(), tasks.iter().map(|t| t.id.clone()).collect())
            })
            .collect()
    }

    /// Tasks grouped by phase, like [`ParseResult::tasks_by_phase`] but
    /// keeping every task even when ids repeat.
    #[must_use]
    pub fn phase_groups(&self) -> Vec<(&str, Vec<&Task>)> {
        let mut groups: Vec<(&str, Vec<&Task>)> = Vec::new();
        for task in &self.tasks {
            match groups.iter_mut().find(|(phase, _)| *phase == task.phase) {
                Some((_, tasks)) => tasks.push(task),
                None => groups.push((task.phase.as_str(), vec![task])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, phase: &str, complete: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            priority: Priority::Should,
            estimate: "Unknown".to_string(),
            dependencies: "None".to_string(),
            file_path: None,
            fr_refs: None,
            nfr_refs: None,
            phase: phase.to_string(),
            spec_name: "001-feature".to_string(),
            acceptance_criteria: Vec::new(),
            is_complete: complete,
        }
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("Must"), Priority::Must);
        assert_eq!(Priority::parse("MUST"), Priority::Must);
        assert_eq!(Priority::parse("could"), Priority::Could);
        assert_eq!(Priority::parse("Should"), Priority::Should);
    }

    #[test]
    fn priority_parse_accepts_wont_spellings() {
        assert_eq!(Priority::parse("Won't"), Priority::Wont);
        assert_eq!(Priority::parse("won't"), Priority::Wont);
        assert_eq!(Priority::parse("wont"), Priority::Wont);
        assert_eq!(Priority::parse("Won\u{2019}t"), Priority::Wont);
    }

    #[test]
    fn priority_parse_falls_back_to_should() {
        assert_eq!(Priority::parse(""), Priority::Should);
        assert_eq!(Priority::parse("urgent!!"), Priority::Should);
        assert_eq!(Priority::default(), Priority::Should);
    }

    #[test]
    fn priority_parse_reads_leading_word() {
        assert_eq!(Priority::parse("Must (P1)"), Priority::Must);
        assert_eq!(Priority::parse("Must - blocking"), Priority::Must);
        assert_eq!(Priority::parse("Could, nice to have"), Priority::Could);
        assert_eq!(Priority::parse("Won't (deferred)"), Priority::Wont);
        assert_eq!(Priority::parse("  should"), Priority::Should);
    }

    #[test]
    fn priority_labels() {
        assert_eq!(Priority::Must.label(), "priority:high");
        assert_eq!(Priority::Should.label(), "priority:medium");
        assert_eq!(Priority::Could.label(), "priority:low");
        assert_eq!(Priority::Wont.label(), "priority:wont");
        assert_eq!(Priority::Wont.to_string(), "Won't");
    }

    #[test]
    fn task_derived_labels() {
        let t = task("T001", "Phase 12: Polish", false);
        assert_eq!(t.full_title(), "[T001] Task T001");
        assert_eq!(t.phase_label().as_deref(), Some("phase-12"));
        assert_eq!(t.spec_label(), "spec:001-feature");
        assert_eq!(task("T002", "", false).phase_label(), None);
    }

    #[test]
    fn task_files_split_on_commas() {
        let mut t = task("T001", "", false);
        assert!(t.files().is_empty());
        t.file_path = Some("src/a.rs, src/b.rs,".to_string());
        assert_eq!(t.files(), vec!["src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn task_files_strip_backticks_per_item() {
        let mut t = task("T001", "", false);
        t.file_path = Some("src/api.rs`, `src/routes.rs".to_string());
        assert_eq!(t.files(), vec!["src/api.rs", "src/routes.rs"]);
        t.file_path = Some("`src/one.rs`".to_string());
        assert_eq!(t.files(), vec!["src/one.rs"]);
    }

    #[test]
    fn phase_groups_keep_repeated_ids() {
        let mut repeated = task("T001", "Phase 1: Setup", false);
        repeated.title = "Second".to_string();
        let result = ParseResult {
            spec_name: "001-feature".to_string(),
            tasks: vec![task("T001", "Phase 1: Setup", false), repeated],
            phases: vec!["Phase 1: Setup".to_string()],
            errors: Vec::new(),
        };
        let groups = result.phase_groups();
        assert_eq!(groups.len(), 1);
        let titles: Vec<&str> = groups[0].1.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Task T001", "Second"]);
    }

    #[test]
    fn parse_result_counts_and_groups() {
        let result = ParseResult {
            spec_name: "001-feature".to_string(),
            tasks: vec![
                task("T000", "", false),
                task("T001", "Phase 1: Setup", true),
                task("T002", "Phase 1: Setup", false),
                task("T003", "Phase 2: Build", false),
            ],
            phases: vec!["Phase 1: Setup".to_string(), "Phase 2: Build".to_string()],
            errors: Vec::new(),
        };
        assert_eq!(result.complete_count(), 1);
        assert_eq!(result.incomplete_count(), 3);

        let groups = result.tasks_by_phase();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], (String::new(), vec!["T000".to_string()]));
        assert_eq!(groups[1].1, vec!["T001".to_string(), "T002".to_string()]);
        assert_eq!(groups[2].0, "Phase 2: Build");
    }
}
