//! HTTP client for the Brain consistency service

use async_trait::async_trait;
use greenlight_application::{BrainError, BrainPort, BrainSearchHit, BrainValidation};
use greenlight_domain::Department;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Brain adapter speaking the validation and search endpoints
pub struct BrainClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    content: &'a str,
    department: String,
    project_id: &'a str,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    kinds: &'a [String],
    limit: usize,
    threshold: f64,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<BrainSearchHit>,
}

impl BrainClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, BrainError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| BrainError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BrainError::RequestFailed(format!("{}: {}", status.as_u16(), text)));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::RequestFailed(format!("invalid response body: {}", e)))
    }
}

#[async_trait]
impl BrainPort for BrainClient {
    async fn validate_content(
        &self,
        content: &str,
        department: &Department,
        project_id: &str,
    ) -> Result<BrainValidation, BrainError> {
        debug!("Brain validation for project {} via {}", project_id, department);
        self.post_json(
            "api/validate",
            &ValidateRequest {
                content,
                department: department.to_string(),
                project_id,
            },
        )
        .await
    }

    async fn semantic_search(
        &self,
        query: &str,
        kinds: &[String],
        limit: usize,
        threshold: f64,
    ) -> Result<Vec<BrainSearchHit>, BrainError> {
        let response: SearchResponse = self
            .post_json(
                "api/search",
                &SearchRequest {
                    query,
                    kinds,
                    limit,
                    threshold,
                },
            )
            .await?;
        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = BrainClient::new("http://brain:9000/");
        assert_eq!(client.endpoint("api/validate"), "http://brain:9000/api/validate");
    }

    #[test]
    fn test_validation_payload_parses() {
        let json = r#"{
            "valid": true,
            "quality_score": 0.82,
            "coherence_score": 0.9,
            "creativity_score": 0.7,
            "completeness_score": 0.88,
            "contradictions": ["Mira's eye color changed"],
            "suggestions": []
        }"#;
        let validation: BrainValidation = serde_json::from_str(json).unwrap();
        assert!(validation.valid);
        assert_eq!(validation.contradictions.len(), 1);
    }

    #[test]
    fn test_search_response_defaults_to_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
