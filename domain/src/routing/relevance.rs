//! Department classification from relevance scores
//!
//! Routing is pure selection logic: given per-department relevance in
//! [0, 1] from whatever scorer the caller wires in, plus explicit hints,
//! classify every known department as primary, supporting, or not relevant.
//! Hints always win; the heuristic only fills in what the caller left
//! unsaid.

use crate::core::department::Department;
use crate::core::error::DomainError;
use crate::core::request::ProductionRequest;
use crate::scoring::dimensions::clamp_unit;
use serde::{Deserialize, Serialize};

/// Relevance above this makes a department supporting
pub const RELEVANCE_FLOOR: f64 = 0.3;

/// One department's relevance to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRelevance {
    pub department: Department,
    /// Relevance in [0, 1]
    pub score: f64,
    /// Explicitly requested by the caller
    pub hinted: bool,
}

/// How a department participates in a production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingRole {
    Primary,
    Supporting,
    NotRelevant,
}

/// Which departments lead, assist, and sit out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub primary: DepartmentRelevance,
    pub supporting: Vec<DepartmentRelevance>,
    pub not_relevant: Vec<DepartmentRelevance>,
    pub floor: f64,
}

impl RoutingDecision {
    /// Primary first, then supporting in canonical order
    pub fn selected(&self) -> Vec<DepartmentRelevance> {
        let mut all = vec![self.primary.clone()];
        all.extend(self.supporting.iter().cloned());
        all
    }

    pub fn selected_departments(&self) -> Vec<Department> {
        self.selected().into_iter().map(|r| r.department).collect()
    }

    pub fn role_of(&self, department: &Department) -> RoutingRole {
        if &self.primary.department == department {
            RoutingRole::Primary
        } else if self.supporting.iter().any(|r| &r.department == department) {
            RoutingRole::Supporting
        } else {
            RoutingRole::NotRelevant
        }
    }

    pub fn relevance_of(&self, department: &Department) -> f64 {
        self.selected()
            .iter()
            .find(|r| &r.department == department)
            .map(|r| r.score)
            .unwrap_or(0.0)
    }
}

/// Classify departments from raw relevance scores
///
/// Scores are clamped into [0, 1]. Hinted departments are forced to full
/// relevance whether or not the scorer mentioned them. The highest scorer
/// becomes primary, ties broken by canonical department order so identical
/// inputs always produce identical decisions. Everything else above the
/// floor is supporting; the rest is not relevant and never runs. A request
/// nothing scores against is a structural error.
pub fn classify_departments(
    request: &ProductionRequest,
    scores: &[(Department, f64)],
    floor: f64,
) -> Result<RoutingDecision, DomainError> {
    let mut ranked: Vec<DepartmentRelevance> = Vec::new();

    for department in Department::known() {
        let hinted = request.is_hinted(&department);
        let raw = scores
            .iter()
            .find(|(d, _)| d == &department)
            .map(|(_, s)| *s)
            .unwrap_or(0.0);
        let score = if hinted { 1.0 } else { clamp_unit(raw) };
        ranked.push(DepartmentRelevance { department, score, hinted });
    }

    // Hinted custom departments have no table entry but still participate.
    for hint in &request.hints {
        if !ranked.iter().any(|r| &r.department == hint) {
            ranked.push(DepartmentRelevance {
                department: hint.clone(),
                score: 1.0,
                hinted: true,
            });
        }
    }

    let primary_idx = ranked
        .iter()
        .enumerate()
        .max_by(|(ai, a), (bi, b)| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                // Earlier canonical position wins ties.
                .then(bi.cmp(ai))
        })
        .map(|(i, _)| i)
        .ok_or(DomainError::NoDepartments)?;

    if ranked[primary_idx].score <= 0.0 {
        return Err(DomainError::NoDepartments);
    }

    let primary = ranked.remove(primary_idx);
    let (supporting, not_relevant): (Vec<_>, Vec<_>) =
        ranked.into_iter().partition(|r| r.hinted || r.score > floor);

    Ok(RoutingDecision { primary, supporting, not_relevant, floor })
}
