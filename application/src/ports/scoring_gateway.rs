//! Scoring gateway port
//!
//! Defines the interface for the chat-completion backend used to grade
//! content. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scoring gateway operations
#[derive(Error, Debug)]
pub enum ScoringGatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response from model {0}")]
    EmptyResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ScoringGatewayError {
    /// Transient errors are worth retrying; the rest are not
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScoringGatewayError::ConnectionError(_)
                | ScoringGatewayError::RateLimited(_)
                | ScoringGatewayError::ServerError(_)
                | ScoringGatewayError::Timeout
        )
    }
}

/// One message in a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Sampling options for one chat-completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        // Grading favors determinism over creativity.
        Self {
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

/// Completed chat response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub content: String,
    pub model: String,
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Gateway for chat-completion calls
///
/// Retry, backoff, and backup-model fallback are the adapter's concern;
/// by the time an error surfaces here it is final.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    async fn chat_complete(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatCompletion, ScoringGatewayError>;

    /// Convenience wrapper for the common system + user pair
    async fn complete_text(
        &self,
        system: &str,
        user: &str,
        options: ChatOptions,
    ) -> Result<ChatCompletion, ScoringGatewayError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.chat_complete(&messages, options).await
    }
}
