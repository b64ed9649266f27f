//! OpenAI-compatible scoring gateway
//!
//! Speaks `POST {base_url}/chat/completions` against any provider that
//! implements the OpenAI chat API. Retry, linear backoff, and backup-model
//! fallback are driven by the [`RetryState`] machine; by the time an error
//! leaves this adapter it is final.

use super::retry::{RetryDirective, RetryState};
use super::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use greenlight_application::{ChatCompletion, ChatMessage, ChatOptions, ScoringGateway, ScoringGatewayError};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_MS: u64 = 500;

/// Scoring gateway over an OpenAI-compatible HTTP API
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    backup_model: Option<String>,
    timeout: Duration,
    max_retries: u32,
    backoff_ms: u64,
}

impl OpenAiGateway {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            backup_model: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_backup_model(mut self, model: impl Into<String>) -> Self {
        self.backup_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_ms = backoff_ms;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn send_once(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatCompletion, ScoringGatewayError> {
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let mut request = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScoringGatewayError::Timeout
            } else if e.is_connect() {
                ScoringGatewayError::ConnectionError(e.to_string())
            } else {
                ScoringGatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(classify_status(status, message));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScoringGatewayError::RequestFailed(format!("invalid response body: {}", e)))?;

        let usage = parsed.usage.unwrap_or_default();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(ScoringGatewayError::EmptyResponse(model.to_string()));
        }

        Ok(ChatCompletion {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_string()),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            finish_reason: None,
        })
    }
}

fn classify_status(status: StatusCode, message: String) -> ScoringGatewayError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ScoringGatewayError::RateLimited(message)
    } else if status.is_server_error() {
        ScoringGatewayError::ServerError(format!("{}: {}", status.as_u16(), message))
    } else {
        ScoringGatewayError::RequestFailed(format!("{}: {}", status.as_u16(), message))
    }
}

#[async_trait]
impl ScoringGateway for OpenAiGateway {
    async fn chat_complete(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatCompletion, ScoringGatewayError> {
        let mut state = RetryState::new(
            self.max_retries,
            self.backoff_ms,
            self.backup_model.is_some(),
        );
        let mut model = self.model.as_str();

        loop {
            debug!("Scoring call via {} at {}", model, self.endpoint());
            let error = match self.send_once(model, messages, options).await {
                Ok(completion) => return Ok(completion),
                Err(e) => e,
            };

            match state.next(error.is_transient()) {
                RetryDirective::RetryAfter(delay) => {
                    warn!(
                        "Scoring call on {} failed ({}), retrying in {}ms",
                        model,
                        error,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDirective::SwitchToBackup => {
                    model = self.backup_model.as_deref().unwrap_or(&self.model);
                    warn!("Falling back to backup model {} ({})", model, error);
                }
                RetryDirective::Fail => return Err(error),
            }
        }
    }
}
