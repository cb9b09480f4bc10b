//! Error types for Scrub

use thiserror::Error;

/// Core error type for Scrub operations
#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),

    #[error("Malformed failure payload: {0}")]
    MalformedFailure(String),
}

/// Result type alias for Scrub operations
pub type Result<T> = std::result::Result<T, ScrubError>;
