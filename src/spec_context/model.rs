//! Aggregated context extracted from the companion spec documents.

use std::fmt::Write;

use serde::Serialize;

/// One extractable context field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    /// Feature description from `spec.md`.
    FeatureOverview,
    /// Success criteria from `spec.md`.
    SuccessCriteria,
    /// Architecture overview from `plan.md`.
    ArchitectureOverview,
    /// Target state from `plan.md`.
    TargetState,
    /// Technical approach from `plan.md`.
    TechnicalApproach,
    /// Key decisions from `research.md`.
    KeyDecisions,
    /// Core models from `data-model.md`.
    DataModels,
}

impl ContextField {
    /// Every field, in rendering order.
    pub const ALL: [Self; 7] = [
        Self::FeatureOverview,
        Self::SuccessCriteria,
        Self::ArchitectureOverview,
        Self::TargetState,
        Self::TechnicalApproach,
        Self::KeyDecisions,
        Self::DataModels,
    ];

    /// Maximum lines kept when the field is stored.
    #[must_use]
    pub fn max_lines(self) -> usize {
        match self {
            Self::SuccessCriteria => 15,
            Self::FeatureOverview
            | Self::TargetState
            | Self::TechnicalApproach
            | Self::KeyDecisions => 30,
            Self::ArchitectureOverview => 40,
            Self::DataModels => 50,
        }
    }

    /// Heading used when the field is rendered.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::FeatureOverview => "Feature Overview",
            Self::SuccessCriteria => "Success Criteria",
            Self::ArchitectureOverview => "Architecture Overview",
            Self::TargetState => "Target State",
            Self::TechnicalApproach => "Technical Approach",
            Self::KeyDecisions => "Key Decisions",
            Self::DataModels => "Data Models",
        }
    }
}

/// Context pulled from `spec.md`, `plan.md`, `research.md` and
/// `data-model.md` next to a tasks document.
///
/// Every content field is independently optional: `None` means the section
/// was not found (or its file was missing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecContext {
    /// Folder the companion files were looked up in.
    pub spec_folder: String,
    /// Feature description.
    pub feature_overview: Option<String>,
    /// Measurable success criteria.
    pub success_criteria: Option<String>,
    /// High-level architecture.
    pub architecture_overview: Option<String>,
    /// Desired end state.
    pub target_state: Option<String>,
    /// Implementation approach.
    pub technical_approach: Option<String>,
    /// Decisions recorded during research.
    pub key_decisions: Option<String>,
    /// Core data models.
    pub data_models: Option<String>,
    /// Companion files that were present.
    pub files_found: Vec<String>,
    /// Companion files that were absent.
    pub files_missing: Vec<String>,
    /// Non-fatal problems hit while reading or extracting.
    pub extraction_warnings: Vec<String>,
}

impl SpecContext {
    /// Returns `true` when no content field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContextField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Returns the value of one field.
    #[must_use]
    pub fn get(&self, field: ContextField) -> Option<&str> {
        match field {
            ContextField::FeatureOverview => self.feature_overview.as_deref(),
            ContextField::SuccessCriteria => self.success_criteria.as_deref(),
            ContextField::ArchitectureOverview => self.architecture_overview.as_deref(),
            ContextField::TargetState => self.target_state.as_deref(),
            ContextField::TechnicalApproach => self.technical_approach.as_deref(),
            ContextField::KeyDecisions => self.key_decisions.as_deref(),
            ContextField::DataModels => self.data_models.as_deref(),
        }
    }

    /// Sets one field.
    pub fn set(&mut self, field: ContextField, value: String) {
        let slot = match field {
            ContextField::FeatureOverview => &mut self.feature_overview,
            ContextField::SuccessCriteria => &mut self.success_criteria,
            ContextField::ArchitectureOverview => &mut self.architecture_overview,
            ContextField::TargetState => &mut self.target_state,
            ContextField::TechnicalApproach => &mut self.technical_approach,
            ContextField::KeyDecisions => &mut self.key_decisions,
            ContextField::DataModels => &mut self.data_models,
        };
        *slot = Some(value);
    }

    /// Renders the present fields as a `## Spec Context` markdown block.
    ///
    /// Returns an empty string when the context is empty.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("## Spec Context\n");
        for field in ContextField::ALL {
            if let Some(text) = self.get(field) {
                let _ = write!(out, "\n### {}\n\n{}\n", field.heading(), text);
            }
        }
        out
    }
}
