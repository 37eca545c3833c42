//! Library-level tests that parse real documents from disk.

use std::path::Path;

use speckit_to_issue::adapters::live::filesystem::LiveFileSystem;
use speckit_to_issue::issue::{build_feature_issue, task_to_issue};
use speckit_to_issue::spec_context::read_spec_context;
use speckit_to_issue::tasks::{parse_tasks_file, Priority};
use speckit_to_issue::Error;

const TASKS: &str = "# Tasks

## Phase 1: Backend

### T001: Add forecast endpoint
- **Priority:** Must
- **Estimate:** 1 hour
- **FR:** FR-001
- **File:** `src/api.rs`, `src/routes.rs`

**Acceptance Criteria:**
- [x] Returns JSON
- [x] Handles unknown city

### T002 Broken header without colon

### T003: Cache responses
- **Priority:** Won't

**Acceptance Criteria:**
- [ ] Entries expire
";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn spec_folder(root: &Path) -> std::path::PathBuf {
    let folder = root.join("specs").join("007-forecast-api");
    std::fs::create_dir_all(&folder).unwrap();
    folder
}

#[test]
fn parses_document_with_warning_for_malformed_block() {
    let dir = tempfile::tempdir().unwrap();
    let folder = spec_folder(dir.path());
    write(&folder, "tasks.md", TASKS);

    let result = parse_tasks_file(&LiveFileSystem, &folder.join("tasks.md")).unwrap();

    assert_eq!(result.spec_name, "007-forecast-api");
    assert_eq!(result.tasks.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("T002 Broken header"));

    let first = &result.tasks[0];
    assert!(first.is_complete);
    assert_eq!(first.files(), vec!["src/api.rs", "src/routes.rs"]);
    assert_eq!(first.phase, "Phase 1: Backend");
    assert_eq!(result.tasks[1].priority, Priority::Wont);
}

#[test]
fn missing_document_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("specs/none/tasks.md");
    let err = parse_tasks_file(&LiveFileSystem, &path).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn context_flows_into_issue_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let folder = spec_folder(dir.path());
    write(&folder, "tasks.md", TASKS);
    write(
        &folder,
        "plan.md",
        "# Plan\n\n## Technical Approach\nAxum handlers over a cache.\n\n## Other\nignored\n",
    );
    write(&folder, "data-model.md", "## Core Models\n\n- Forecast\n- City\n");

    let tasks_file = folder.join("tasks.md");
    let result = parse_tasks_file(&LiveFileSystem, &tasks_file).unwrap();
    let context = read_spec_context(&LiveFileSystem, &tasks_file);

    assert_eq!(context.files_found, vec!["plan.md", "data-model.md"]);
    assert_eq!(context.files_missing, vec!["spec.md", "research.md"]);
    assert_eq!(context.technical_approach.as_deref(), Some("Axum handlers over a cache."));

    let issue = task_to_issue(&result.tasks[1], false, Some(&context));
    assert_eq!(issue.title, "[T003] Cache responses");
    assert!(issue.body.contains("Axum handlers over a cache."));
    assert!(!issue.body.contains("ignored"));

    let feature = build_feature_issue(&result.spec_name, Some(&context), &result.tasks, false);
    assert_eq!(feature.title, "Feature: Forecast Api");
    assert!(feature.body.contains("- [x] **T001**: Add forecast endpoint (1 hour)"));
    assert!(feature.body.contains("`src/routes.rs`"));
}
