//! Builds a [`SpecContext`] from the companion documents of a tasks file.

use std::path::{Path, PathBuf};

use super::model::{ContextField, SpecContext};
use super::section::{extract_section, extract_subsection, truncate_content};
use crate::ports::FileSystem;

/// Companion documents, in probe order.
pub const SPEC_FILES: [&str; 4] = ["spec.md", "plan.md", "research.md", "data-model.md"];

/// Where one field's text is looked for, tried in order until non-empty.
enum Source {
    /// `### <sub>` inside `## <section>`.
    Nested(&'static str, &'static str),
    Section(&'static str),
    Subsection(&'static str),
}

impl Source {
    fn extract(&self, content: &str) -> String {
        match self {
            Self::Nested(section, sub) => {
                extract_subsection(&extract_section(content, section), sub)
            }
            Self::Section(name) => extract_section(content, name),
            Self::Subsection(name) => extract_subsection(content, name),
        }
    }
}

/// Extraction chains per companion file.
fn chains(file: &str) -> &'static [(ContextField, &'static [Source])] {
    use ContextField as F;
    use Source::{Nested, Section, Subsection};

    match file {
        "spec.md" => &[
            (
                F::FeatureOverview,
                &[Nested("Feature Overview", "Description"), Section("Feature Overview")],
            ),
            (F::SuccessCriteria, &[Subsection("Success Criteria")]),
        ],
        "plan.md" => &[
            (F::ArchitectureOverview, &[Section("Architecture Overview"), Section("Architecture")]),
            (F::TargetState, &[Subsection("Target State"), Section("Target State")]),
            (F::TechnicalApproach, &[Section("Technical Approach")]),
        ],
        "research.md" => &[(
            F::KeyDecisions,
            &[Section("Summary of Decisions"), Section("Key Decisions"), Section("Decisions")],
        )],
        "data-model.md" => &[(F::DataModels, &[Section("Core Models"), Section("Models")])],
        _ => &[],
    }
}

/// Applies `file`'s extraction chains to its content.
fn extract_fields(file: &str, content: &str) -> Vec<(ContextField, String)> {
    chains(file)
        .iter()
        .filter_map(|(field, sources)| {
            let text = sources
                .iter()
                .map(|source| source.extract(content))
                .find(|text| !text.is_empty())?;
            let (text, _) = truncate_content(&text, field.max_lines());
            Some((*field, text))
        })
        .collect()
}

/// Resolves each companion document next to `tasks_file`, `None` when absent.
#[must_use]
pub fn discover_spec_files(
    fs: &dyn FileSystem,
    tasks_file: &Path,
) -> Vec<(&'static str, Option<PathBuf>)> {
    let folder = tasks_file.parent().unwrap_or_else(|| Path::new(""));
    SPEC_FILES
        .iter()
        .map(|name| {
            let path = folder.join(name);
            tracing::debug!(path = %path.display(), "probing spec file");
            (*name, fs.exists(&path).then_some(path))
        })
        .collect()
}

/// Reads the companion documents of `tasks_file` into a [`SpecContext`].
///
/// Never fails: a missing file leaves its fields unset, and a file that
/// cannot be read is recorded as `"<file>: <error>"` in
/// `extraction_warnings` without stopping the others.
#[must_use]
pub fn read_spec_context(fs: &dyn FileSystem, tasks_file: &Path) -> SpecContext {
    let folder = tasks_file.parent().unwrap_or_else(|| Path::new(""));
    let mut ctx =
        SpecContext { spec_folder: folder.display().to_string(), ..SpecContext::default() };

    for (name, path) in discover_spec_files(fs, tasks_file) {
        let Some(path) = path else {
            ctx.files_missing.push(name.to_string());
            continue;
        };
        ctx.files_found.push(name.to_string());

        match fs.read_to_string(&path) {
            Ok(content) => {
                for (field, text) in extract_fields(name, &content) {
                    ctx.set(field, text);
                }
            }
            Err(e) => {
                let warning = format!("{name}: {e}");
                tracing::warn!("{warning}");
                ctx.extraction_warnings.push(warning);
            }
        }
    }
    ctx
}
