//! HTTP rule service
//!
//! Sends rules to the rule service as JSON:
//! - `POST {base}/{project}/do/generate` generates (or verifies) rule code
//! - `POST {base}/{project}/data/rule` persists a new rule
//!
//! Non-2xx responses keep their status and body. Transport errors have no
//! status; their body is synthesized so it still carries an `error` field.

use async_trait::async_trait;
use scrub_core::{BackendFailure, GeneratedCode, RuleBackend, RuleDraft};
use scrub_settings::BackendSettings;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// [`RuleBackend`] backed by the rule service's REST API
#[derive(Debug, Clone)]
pub struct HttpRuleBackend {
    client: reqwest::Client,
    base_url: String,
    project: String,
}

impl HttpRuleBackend {
    /// Create a client for the service described by `settings`
    pub fn new(settings: &BackendSettings) -> ServiceResult<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ServiceError::InvalidBaseUrl(settings.base_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ServiceError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            project: settings.project.clone(),
        })
    }

    pub fn generate_url(&self) -> String {
        format!("{}/{}/do/generate", self.base_url, self.project)
    }

    pub fn rule_url(&self) -> String {
        format!("{}/{}/data/rule", self.base_url, self.project)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<String, BackendFailure> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url, error = %e, "rule service unreachable");
                BackendFailure::from_message(None, e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendFailure::from_message(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "rule service rejected request");
            return Err(BackendFailure::new(Some(status.as_u16()), text));
        }

        Ok(text)
    }
}

#[async_trait]
impl RuleBackend for HttpRuleBackend {
    #[tracing::instrument(skip(self, rule), fields(rule = %rule.name, rule_type = %rule.rule_type))]
    async fn generate(&self, rule: &RuleDraft) -> Result<GeneratedCode, BackendFailure> {
        let body = self.post(&self.generate_url(), rule).await?;

        serde_json::from_str(&body).map_err(|e| {
            BackendFailure::from_message(Some(200), format!("Unexpected generate response: {}", e))
        })
    }

    #[tracing::instrument(skip(self, rule), fields(rule = %rule.name, rule_type = %rule.rule_type))]
    async fn create_rule(&self, rule: &RuleDraft) -> Result<(), BackendFailure> {
        self.post(&self.rule_url(), rule).await?;

        tracing::info!(rule = %rule.name, "Rule created successfully");
        Ok(())
    }
}
