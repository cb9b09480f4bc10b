//! Scrub Core - Core abstractions for the data cleaning rule console
//!
//! This crate provides the types every other Scrub crate depends on:
//!
//! - `RuleType` / `RuleDraft` - The rule record submitted to the backend
//! - `RuleBackend` - Trait for the generate / create-rule backend actions
//! - `BackendFailure` - A rejected backend call and its response body
//! - `ScrubError` - Core error type

mod backend;
mod error;
mod rule;

pub use backend::*;
pub use error::*;
pub use rule::*;
