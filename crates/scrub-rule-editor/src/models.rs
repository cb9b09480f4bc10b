//! Rule editor models

use scrub_core::{RuleDraft, RuleType};
use scrub_settings::EditorSettings;

/// Validation errors for the rule form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingTable,
    MissingContent,
    /// Raised by verify when the code editor holds code
    CodeInEditor,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "Rule name cannot be empty."),
            Self::MissingTable => write!(f, "No table is selected"),
            Self::MissingContent => {
                write!(f, "No content is found, you need to create something.")
            }
            Self::CodeInEditor => write!(f, "No Java code is found in the editor."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// The rule a session starts from.
///
/// Empty for a new rule, filled in when editing an existing one. Every
/// sub-editor receives it so it can restore its own state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSeed {
    pub name: String,
    pub rule_type: RuleType,
    pub table1: String,
    pub table2: Option<String>,
    pub code: String,
}

impl From<RuleDraft> for RuleSeed {
    fn from(draft: RuleDraft) -> Self {
        Self {
            name: draft.name,
            rule_type: draft.rule_type,
            table1: draft.table1,
            table2: draft.table2,
            code: draft.code,
        }
    }
}

/// Identifies the element a sub-editor mounts into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ContainerId {
    fn default() -> Self {
        Self::new("structured-editor")
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Active tab in the rule editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    /// The structured sub-editor
    #[default]
    Structured,
    /// The raw code editor
    Code,
}

/// Heights computed when the modal is first shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub body_height: u32,
    pub code_editor_height: u32,
}

impl EditorLayout {
    pub fn compute(viewport_height: u32, settings: &EditorSettings) -> Self {
        let body_height = viewport_height.saturating_sub(settings.chrome_height);
        Self {
            body_height,
            code_editor_height: body_height.saturating_sub(settings.code_toolbar_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingName.to_string(),
            "Rule name cannot be empty."
        );
        assert_eq!(
            ValidationError::MissingTable.to_string(),
            "No table is selected"
        );
        assert_eq!(
            ValidationError::MissingContent.to_string(),
            "No content is found, you need to create something."
        );
    }

    #[test]
    fn test_layout_subtracts_chrome() {
        let layout = EditorLayout::compute(900, &EditorSettings::default());
        assert_eq!(layout.body_height, 762);
        assert_eq!(layout.code_editor_height, 662);
    }

    #[test]
    fn test_layout_clamps_small_viewports() {
        let layout = EditorLayout::compute(120, &EditorSettings::default());
        assert_eq!(layout.body_height, 0);
        assert_eq!(layout.code_editor_height, 0);
    }

    #[test]
    fn test_seed_from_draft() {
        let draft = RuleDraft::new("r", RuleType::Dc, "a", Some("b".into()), "not(t1.x > t2.x)");
        let seed = RuleSeed::from(draft);
        assert_eq!(seed.rule_type, RuleType::Dc);
        assert_eq!(seed.table2.as_deref(), Some("b"));
    }
}
