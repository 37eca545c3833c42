//! Parser for speckit `tasks.md` documents.

use std::path::Path;

use super::grammar::{self, Field};
use super::model::{ParseResult, Priority, Task};
use crate::error::{Error, Result};
use crate::ports::FileSystem;

const DEFAULT_ESTIMATE: &str = "Unknown";
const DEFAULT_DEPENDENCIES: &str = "None";

/// Derives the spec name from the document path.
///
/// `specs/001-feature-name/tasks.md` yields `001-feature-name`; paths without
/// a `specs` segment fall back to the parent folder's name.
#[must_use]
pub fn spec_name_from_path(path: &Path) -> String {
    let mut parts = path.iter();
    while let Some(part) = parts.next() {
        if part == "specs" {
            if let Some(next) = parts.clone().next() {
                return next.to_string_lossy().into_owned();
            }
        }
    }
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parses one task block: its header line and everything up to the next
/// task header.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the block does not start with a well-formed
/// task header.
pub fn parse_task_block(block: &str, phase: &str, spec_name: &str) -> Result<Task> {
    let mut lines = block.lines();
    let header = lines.next().and_then(grammar::match_task_header).ok_or_else(|| {
        let preview: String = block.chars().take(100).collect();
        Error::parse(format!("Invalid task block: no header found in:\n{preview}"))
    })?;

    let mut priority = None;
    let mut estimate = None;
    let mut dependencies = None;
    let mut file_path = None;
    let mut fr_refs = None;
    let mut nfr_refs = None;
    let mut acceptance_criteria = Vec::new();

    for line in lines {
        if let Some(criterion) = grammar::match_criterion(line) {
            acceptance_criteria.push(criterion);
            continue;
        }
        // First occurrence of each field wins.
        let slots = [
            (Field::Priority, &mut priority),
            (Field::Estimate, &mut estimate),
            (Field::Dependencies, &mut dependencies),
            (Field::File, &mut file_path),
            (Field::Fr, &mut fr_refs),
            (Field::Nfr, &mut nfr_refs),
        ];
        for (field, slot) in slots {
            if slot.is_none() {
                if let Some(value) = grammar::match_field(line, field) {
                    *slot = Some(value);
                    break;
                }
            }
        }
    }

    // Completion is only ever upgraded by the checklist, never downgraded.
    let all_checked =
        !acceptance_criteria.is_empty() && acceptance_criteria.iter().all(|c| c.checked);
    let is_complete = header.complete || all_checked;

    Ok(Task {
        id: header.id,
        title: header.title,
        priority: priority.as_deref().map(Priority::parse).unwrap_or_default(),
        estimate: estimate.unwrap_or_else(|| DEFAULT_ESTIMATE.to_string()),
        dependencies: dependencies.unwrap_or_else(|| DEFAULT_DEPENDENCIES.to_string()),
        file_path,
        fr_refs,
        nfr_refs,
        phase: phase.to_string(),
        spec_name: spec_name.to_string(),
        acceptance_criteria,
        is_complete,
    })
}

/// Parses a whole tasks document held in memory.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the document contains no task headers.
pub fn parse_tasks(content: &str, spec_name: &str) -> Result<ParseResult> {
    let source = if spec_name.is_empty() { "document" } else { spec_name };
    parse_document(content, spec_name, source)
}

/// Reads and parses the tasks document at `path`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file is missing, [`Error::Io`] if it
/// cannot be read, and [`Error::Parse`] if it contains no task headers.
pub fn parse_tasks_file(fs: &dyn FileSystem, path: &Path) -> Result<ParseResult> {
    if !fs.exists(path) {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let content = fs.read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_document(&content, &spec_name_from_path(path), &path.display().to_string())
}

/// Byte offsets of block-level headers, in document order.
struct Outline<'a> {
    tasks: Vec<usize>,
    phases: Vec<(usize, &'a str)>,
}

/// Single forward scan over the document. Both lists come out sorted by
/// offset, which the phase lookup in [`parse_document`] relies on.
fn outline(content: &str) -> Outline<'_> {
    let mut tasks = Vec::new();
    let mut phases = Vec::new();
    let mut offset = 0;
    for raw in content.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        if grammar::is_task_header_candidate(line) {
            tasks.push(offset);
        } else if let Some(name) = grammar::match_phase_header(line) {
            phases.push((offset, name));
        }
        offset += raw.len();
    }
    Outline { tasks, phases }
}

fn parse_document(content: &str, spec_name: &str, source: &str) -> Result<ParseResult> {
    let Outline { tasks: starts, phases } = outline(content);
    if starts.is_empty() {
        return Err(Error::parse(format!("No tasks found in {source}")));
    }
    tracing::debug!(tasks = starts.len(), phases = phases.len(), "outlined {source}");

    let mut tasks = Vec::with_capacity(starts.len());
    let mut errors = Vec::new();
    let mut next_phase = 0;
    let mut current_phase = "";

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(content.len());

        while let Some(&(offset, name)) = phases.get(next_phase) {
            if offset >= start {
                break;
            }
            current_phase = name;
            next_phase += 1;
        }

        match parse_task_block(&content[start..end], current_phase, spec_name) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                let warning = format!("Error parsing task at position {start}: {e}");
                tracing::warn!("{warning}");
                errors.push(warning);
            }
        }
    }

    Ok(ParseResult {
        spec_name: spec_name.to_string(),
        tasks,
        phases: phases.into_iter().map(|(_, name)| name.to_string()).collect(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    const SAMPLE: &str = "# Tasks: Sample Feature

> **Spec:** sample-feature

---

## Phase 1: Setup

### T001: Create project structure
- **Priority:** Must
- **Estimate:** 10 min
- **Dependencies:** None
- **File:** `src/main.py`
- **FR:** FR-001
- **Acceptance Criteria:**
  - [ ] Create src/ directory
  - [ ] Add __init__.py file

### T002: Add configuration ✅
- **Priority:** Should
- **Estimate:** 15 min
- **Dependencies:** T001
- **File:** `src/config.py`
- **Acceptance Criteria:**
  - [x] Create config module

## Phase 2: Implementation

### T003: Implement core logic
- **Priority:** Must
- **Estimate:** 30 min
- **Dependencies:** T001, T002
- **Acceptance Criteria:**
  - [ ] Create main function
  - [ ] Add error handling
";

    struct MemFs {
        files: HashMap<PathBuf, String>,
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }
    }

    #[test]
    fn parses_sample_document() {
        let result = parse_tasks(SAMPLE, "sample-feature").unwrap();

        assert_eq!(result.tasks.len(), 3);
        assert_eq!(result.phases, vec!["Phase 1: Setup", "Phase 2: Implementation"]);
        assert_eq!(result.complete_count(), 1);
        assert_eq!(result.incomplete_count(), 2);
        assert!(result.errors.is_empty());

        let t1 = &result.tasks[0];
        assert_eq!(t1.id, "T001");
        assert_eq!(t1.title, "Create project structure");
        assert_eq!(t1.priority, Priority::Must);
        assert_eq!(t1.estimate, "10 min");
        assert_eq!(t1.file_path.as_deref(), Some("src/main.py"));
        assert_eq!(t1.fr_refs.as_deref(), Some("FR-001"));
        assert_eq!(t1.nfr_refs, None);
        assert_eq!(t1.phase, "Phase 1: Setup");
        assert_eq!(t1.acceptance_criteria.len(), 2);
        assert!(!t1.is_complete);

        let t2 = &result.tasks[1];
        assert_eq!(t2.title, "Add configuration");
        assert!(t2.is_complete);

        let t3 = &result.tasks[2];
        assert_eq!(t3.phase, "Phase 2: Implementation");
        assert_eq!(t3.dependencies, "T001, T002");
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = parse_tasks(SAMPLE, "s").unwrap();
        let second = parse_tasks(SAMPLE, "s").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let task = parse_task_block("### T009: Bare task\nSome prose.\n", "", "x").unwrap();
        assert_eq!(task.priority, Priority::Should);
        assert_eq!(task.estimate, "Unknown");
        assert_eq!(task.dependencies, "None");
        assert_eq!(task.file_path, None);
        assert_eq!(task.fr_refs, None);
        assert!(task.acceptance_criteria.is_empty());
        assert!(!task.is_complete);
    }

    #[test]
    fn header_marker_completes_without_criteria() {
        let task = parse_task_block("### T001: Done ✅\n", "", "x").unwrap();
        assert!(task.is_complete);
        assert!(task.acceptance_criteria.is_empty());
    }

    #[test]
    fn all_checked_criteria_complete_the_task() {
        let done = parse_task_block("### T001: A\n- [x] one\n- [x] two\n", "", "x").unwrap();
        assert!(done.is_complete);

        let open = parse_task_block("### T001: A\n- [x] one\n- [ ] two\n", "", "x").unwrap();
        assert!(!open.is_complete);
        assert!(open.acceptance_criteria[0].checked);
        assert!(!open.acceptance_criteria[1].checked);
    }

    #[test]
    fn header_marker_is_never_downgraded() {
        let task = parse_task_block("### T001: A ✅\n- [x] one\n- [ ] two\n", "", "x").unwrap();
        assert!(task.is_complete);
    }

    #[test]
    fn first_field_occurrence_wins() {
        let block = "### T001: A\n- **Priority:** Could\n- **Priority:** Must\n";
        assert_eq!(parse_task_block(block, "", "x").unwrap().priority, Priority::Could);
    }

    #[test]
    fn wont_priority_survives_the_apostrophe() {
        let block = "### T001: A\n- **Priority:** Won't\n";
        assert_eq!(parse_task_block(block, "", "x").unwrap().priority, Priority::Wont);
    }

    #[test]
    fn annotated_priority_uses_leading_word() {
        let block = "### T001: A\n- **Priority:** Must (P1)\n";
        assert_eq!(parse_task_block(block, "", "x").unwrap().priority, Priority::Must);
    }

    #[test]
    fn file_list_with_quoted_items() {
        let block = "### T001: A\n- **File:** `src/api.rs`, `src/routes.rs`\n";
        let task = parse_task_block(block, "", "x").unwrap();
        assert_eq!(task.files(), vec!["src/api.rs", "src/routes.rs"]);
    }

    #[test]
    fn block_without_header_is_an_error() {
        let err = parse_task_block("just text\n- [ ] item\n", "", "x").unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("no header found")));
    }

    #[test]
    fn malformed_block_becomes_a_warning() {
        let doc = "### T001: Good\n- [ ] a\n### T002 no colon here\n- [ ] b\n### T003: Also good\n";
        let result = parse_tasks(doc, "x").unwrap();

        assert_eq!(result.tasks.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Error parsing task at position 23:"));
        assert_eq!(result.tasks[1].id, "T003");
    }

    #[test]
    fn document_without_tasks_is_an_error() {
        let err = parse_tasks("# Tasks\n\n## Phase 1: Setup\n", "x").unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("No tasks found")));
        assert!(parse_tasks("", "").is_err());
    }

    #[test]
    fn tasks_before_any_phase_are_ungrouped() {
        let doc = "### T001: Early\n## Phase 1: Setup\n### T002: Later\n";
        let result = parse_tasks(doc, "x").unwrap();
        assert_eq!(result.tasks[0].phase, "");
        assert_eq!(result.tasks[1].phase, "Phase 1: Setup");
    }

    #[test]
    fn crlf_documents_parse() {
        let doc = "## Phase 1: Setup\r\n### T001: Windows ✅\r\n- **Estimate:** 5 min\r\n";
        let result = parse_tasks(doc, "x").unwrap();
        assert_eq!(result.phases, vec!["Phase 1: Setup"]);
        assert_eq!(result.tasks[0].title, "Windows");
        assert_eq!(result.tasks[0].estimate, "5 min");
        assert!(result.tasks[0].is_complete);
    }

    #[test]
    fn spec_name_from_specs_folder() {
        let path = Path::new("repo/specs/001-feature-name/tasks.md");
        assert_eq!(spec_name_from_path(path), "001-feature-name");
    }

    #[test]
    fn spec_name_falls_back_to_parent() {
        assert_eq!(spec_name_from_path(Path::new("docs/weather/tasks.md")), "weather");
        assert_eq!(spec_name_from_path(Path::new("tasks.md")), "");
    }

    #[test]
    fn parse_file_reports_missing_path() {
        let fs = MemFs { files: HashMap::new() };
        let err = parse_tasks_file(&fs, Path::new("specs/x/tasks.md")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn parse_file_uses_spec_folder_name() {
        let path = PathBuf::from("specs/sample-feature/tasks.md");
        let fs = MemFs { files: HashMap::from([(path.clone(), SAMPLE.to_string())]) };
        let result = parse_tasks_file(&fs, &path).unwrap();
        assert_eq!(result.spec_name, "sample-feature");
        assert!(result.tasks.iter().all(|t| t.spec_name == "sample-feature"));
    }
}
