//! Events emitted by the Rule Editor View

/// Events published on the channel injected into the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEditorEvent {
    /// A rule was created.
    /// The rule list should reload and show `info` to the user.
    RefreshRuleList {
        /// Confirmation message
        info: String,
    },

    /// The modal was dismissed, either by the user or after a save.
    Closed,
}
