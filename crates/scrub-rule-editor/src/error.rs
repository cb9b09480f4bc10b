//! Errors that abort a rule editor operation
//!
//! These are faults, not user mistakes. User mistakes are
//! [`ValidationError`](crate::ValidationError)s and end up in a banner.

use scrub_core::{RuleType, ScrubError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleEditorError {
    #[error("No sub-editor registered for rule type {0}")]
    UnregisteredRuleType(RuleType),

    #[error(transparent)]
    Core(#[from] ScrubError),
}

pub type Result<T> = std::result::Result<T, RuleEditorError>;
