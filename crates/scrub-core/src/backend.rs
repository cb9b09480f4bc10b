//! Backend contract for rule actions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Result, RuleDraft, ScrubError};

/// Source text generated by the backend for a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub data: String,
}

/// A backend call that was rejected by the transport or the server.
///
/// The body is kept raw; [`BackendFailure::message`] pulls the user facing
/// message out of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend request failed (status {status:?}): {body}")]
pub struct BackendFailure {
    /// HTTP status, if the request reached the server
    pub status: Option<u16>,
    /// Raw response body
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl BackendFailure {
    pub fn new(status: Option<u16>, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a failure whose body carries `message` in the usual `error` field
    pub fn from_message(status: Option<u16>, message: impl Into<String>) -> Self {
        let body = serde_json::json!({ "error": message.into() }).to_string();
        Self { status, body }
    }

    /// Extract the `error` field of the JSON response body
    pub fn message(&self) -> Result<String> {
        let parsed: ErrorBody = serde_json::from_str(&self.body).map_err(|e| {
            tracing::warn!(status = ?self.status, error = %e, "failure body has no error field");
            ScrubError::MalformedFailure(e.to_string())
        })?;
        Ok(parsed.error)
    }
}

/// The backend actions the rule editor submits to
#[async_trait]
pub trait RuleBackend: Send + Sync {
    /// Generate source code for a rule. Also used to verify a rule.
    async fn generate(
        &self,
        rule: &RuleDraft,
    ) -> std::result::Result<GeneratedCode, BackendFailure>;

    /// Persist a new rule
    async fn create_rule(&self, rule: &RuleDraft) -> std::result::Result<(), BackendFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleType;

    #[test]
    fn test_message_from_error_body() {
        let failure = BackendFailure::new(Some(409), r#"{"error":"duplicate rule name"}"#);
        assert_eq!(failure.message().unwrap(), "duplicate rule name");
    }

    #[test]
    fn test_message_ignores_extra_fields() {
        let failure = BackendFailure::new(Some(500), r#"{"error":"boom","trace":"..."}"#);
        assert_eq!(failure.message().unwrap(), "boom");
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let failure = BackendFailure::new(Some(502), "<html>Bad Gateway</html>");
        assert!(matches!(
            failure.message(),
            Err(ScrubError::MalformedFailure(_))
        ));

        let failure = BackendFailure::new(Some(400), r#"{"message":"no error field"}"#);
        assert!(failure.message().is_err());
    }

    #[test]
    fn test_from_message_escapes_quotes() {
        let failure = BackendFailure::from_message(None, r#"bad "quote""#);
        assert_eq!(failure.message().unwrap(), r#"bad "quote""#);
        assert_eq!(failure.status, None);
    }

    struct EchoBackend;

    #[async_trait]
    impl RuleBackend for EchoBackend {
        async fn generate(
            &self,
            rule: &RuleDraft,
        ) -> std::result::Result<GeneratedCode, BackendFailure> {
            Ok(GeneratedCode {
                data: format!("// {}\n{}", rule.name, rule.code),
            })
        }

        async fn create_rule(&self, _rule: &RuleDraft) -> std::result::Result<(), BackendFailure> {
            Err(BackendFailure::from_message(Some(409), "exists"))
        }
    }

    #[tokio::test]
    async fn test_backend_is_object_safe() {
        let backend: Box<dyn RuleBackend> = Box::new(EchoBackend);
        let draft = RuleDraft::new("r", RuleType::Udf, "t", None, "body");

        let generated = backend.generate(&draft).await.unwrap();
        assert_eq!(generated.data, "// r\nbody");

        let failure = backend.create_rule(&draft).await.unwrap_err();
        assert_eq!(failure.message().unwrap(), "exists");
    }
}
