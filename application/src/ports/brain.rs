//! Brain consistency service port
//!
//! The Brain is the external knowledge-graph validator. It is an opaque,
//! possibly-unavailable collaborator: every caller must tolerate its absence
//! and fall back to locally computed consistency.

use async_trait::async_trait;
use greenlight_domain::Department;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur talking to the Brain
#[derive(Error, Debug)]
pub enum BrainError {
    #[error("Brain unavailable: {0}")]
    Unavailable(String),

    #[error("Brain request failed: {0}")]
    RequestFailed(String),
}

/// Validation verdict from the Brain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainValidation {
    pub valid: bool,
    /// Scores in [0, 1]
    pub quality_score: f64,
    pub coherence_score: f64,
    pub creativity_score: f64,
    pub completeness_score: f64,
    #[serde(default)]
    pub contradictions: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// One semantic search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainSearchHit {
    pub kind: String,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub summary: Option<String>,
}

/// External cross-department consistency checker
#[async_trait]
pub trait BrainPort: Send + Sync {
    /// Validate produced content against the project knowledge graph
    async fn validate_content(
        &self,
        content: &str,
        department: &Department,
        project_id: &str,
    ) -> Result<BrainValidation, BrainError>;

    /// Rank stored entities semantically close to a query
    async fn semantic_search(
        &self,
        query: &str,
        kinds: &[String],
        limit: usize,
        threshold: f64,
    ) -> Result<Vec<BrainSearchHit>, BrainError>;
}
