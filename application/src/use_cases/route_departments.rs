//! Route Departments use case
//!
//! Turns a production request into a routing decision: scores every known
//! department through the pluggable relevance scorer, then lets the domain
//! classify primary, supporting, and not-relevant departments.

use crate::ports::relevance_scorer::RelevanceScorer;
use greenlight_domain::{
    classify_departments, DomainError, ProductionRequest, RoutingDecision, RELEVANCE_FLOOR,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for selecting departments for a production request
pub struct RouteDepartmentsUseCase {
    scorer: Arc<dyn RelevanceScorer>,
    floor: f64,
}

impl RouteDepartmentsUseCase {
    pub fn new(scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self {
            scorer,
            floor: RELEVANCE_FLOOR,
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Score and classify departments for a request
    ///
    /// A request no department scores against is a structural error; the
    /// caller gets it before any department work starts.
    pub fn execute(&self, request: &ProductionRequest) -> Result<RoutingDecision, DomainError> {
        let scores = self.scorer.score(request);
        debug!("Relevance scores for {}: {:?}", request.project_id, scores);

        let decision = classify_departments(request, &scores, self.floor)?;
        info!(
            "Routed {} to primary {} with {} supporting department(s)",
            request.project_id,
            decision.primary.department,
            decision.supporting.len()
        );
        Ok(decision)
    }
}
