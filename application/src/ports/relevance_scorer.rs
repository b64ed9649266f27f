//! Relevance scorer port
//!
//! How relevance is computed is pluggable; this port only fixes the
//! contract: deterministic for the same input, [0, 1]-valued, comparable
//! across departments.

use greenlight_domain::{Department, ProductionRequest};

/// Per-department relevance heuristic
pub trait RelevanceScorer: Send + Sync {
    /// Score every known department against the request
    fn score(&self, request: &ProductionRequest) -> Vec<(Department, f64)>;
}
