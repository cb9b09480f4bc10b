//! Scrub Services Layer
//!
//! Concrete implementations of the backend contract defined in `scrub-core`.
//!
//! # Services
//!
//! - [`HttpRuleBackend`] - Talks to the rule service over HTTP
//!
//! # Design Principles
//!
//! 1. **No UI dependencies** - Services never know about the editor view
//! 2. **Failures are data** - Every rejected call becomes a `BackendFailure`
//!    carrying a body the editor can turn into a banner

mod error;
mod rule_service;

pub use error::{ServiceError, ServiceResult};
pub use rule_service::HttpRuleBackend;
