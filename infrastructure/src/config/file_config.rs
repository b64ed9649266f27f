//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use greenlight_application::{EngineConfig, ScoringBehavior};
use greenlight_domain::{ThresholdPolicy, RELEVANCE_FLOOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("relevance_floor must be in [0, 1]")]
    InvalidRelevanceFloor,

    #[error("threshold bands must be ordered minimum <= acceptable <= good <= excellent")]
    InvalidThresholds,
}

/// Raw scoring provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Primary scoring model
    pub model: String,
    /// Fallback model after retries are exhausted
    pub backup_model: Option<String>,
    /// Timeout in seconds for API calls
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_ms: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            backup_model: None,
            timeout_secs: 60,
            max_retries: 2,
            backoff_ms: 500,
        }
    }
}

/// Raw assessment cache configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub enabled: bool,
    /// Lifetime of cached assessments; 0 means no expiry
    pub ttl_secs: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
        }
    }
}

/// Raw routing configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// Relevance above this makes a department supporting
    pub relevance_floor: f64,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            relevance_floor: RELEVANCE_FLOOR,
        }
    }
}

/// Raw scoring behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let behavior = ScoringBehavior::default();
        Self {
            temperature: behavior.temperature,
            max_tokens: behavior.max_tokens,
        }
    }
}

/// Raw external services configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServicesConfig {
    /// Consistency service base URL; unset disables external validation
    pub brain_url: Option<String>,
    /// Document store base URL; unset disables context loading
    pub context_url: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Scoring provider settings
    pub provider: FileProviderConfig,
    /// Assessment cache settings
    pub cache: FileCacheConfig,
    /// Department routing settings
    pub routing: FileRoutingConfig,
    /// Scoring call settings
    pub scoring: FileScoringConfig,
    /// External service endpoints
    pub services: FileServicesConfig,
    /// Quality thresholds (uses domain type)
    pub thresholds: ThresholdPolicy,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if let Some(backup) = &self.provider.backup_model {
            if backup.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
        }
        if !(0.0..=1.0).contains(&self.routing.relevance_floor) {
            return Err(ConfigValidationError::InvalidRelevanceFloor);
        }
        if !self.thresholds.is_valid() {
            return Err(ConfigValidationError::InvalidThresholds);
        }
        Ok(())
    }

    /// Build the application-level engine configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            relevance_floor: self.routing.relevance_floor,
            scoring: ScoringBehavior {
                temperature: self.scoring.temperature,
                max_tokens: self.scoring.max_tokens,
                cache_enabled: self.cache.enabled,
                cache_ttl_seconds: self.cache.ttl_secs,
            },
            thresholds: self.thresholds.clone(),
        }
    }
}
