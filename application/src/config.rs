//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases
//! behave, such as sampling settings for scoring calls and cache lifetime.

use greenlight_domain::{ThresholdPolicy, RELEVANCE_FLOOR};
use serde::{Deserialize, Serialize};

/// Behavior of quality scoring calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringBehavior {
    /// Sampling temperature for grading calls; low by default because
    /// grading is not a generative task
    pub temperature: f64,
    pub max_tokens: u32,
    pub cache_enabled: bool,
    pub cache_ttl_seconds: u64,
}

impl Default for ScoringBehavior {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 1024,
            cache_enabled: true,
            cache_ttl_seconds: 3600,
        }
    }
}

/// Engine configuration shared by the production use cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Relevance above this makes a department supporting
    pub relevance_floor: f64,
    pub scoring: ScoringBehavior,
    pub thresholds: ThresholdPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            relevance_floor: RELEVANCE_FLOOR,
            scoring: ScoringBehavior::default(),
            thresholds: ThresholdPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.thresholds.is_valid());
        assert!((0.0..=1.0).contains(&config.relevance_floor));
        assert!(config.scoring.temperature < 0.5);
    }
}
