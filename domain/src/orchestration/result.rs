//! Terminal aggregation of department reports
//!
//! The aggregator runs single-threaded after the execution join barrier and
//! always produces a best-effort result: partial failures lower completeness
//! and quality, they never abort aggregation.

use super::report::{DepartmentReport, ReportStatus};
use crate::routing::relevance::RoutingDecision;
use crate::scoring::decision::QualityDecision;
use crate::scoring::dimensions::clamp_unit;
use crate::scoring::thresholds::{AssessmentLevel, ThresholdPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the overall quality carried by the primary department
pub const PRIMARY_SHARE: f64 = 0.5;

/// Quality floor for the ingest recommendation
pub const INGEST_QUALITY_FLOOR: f64 = 0.75;

/// Consistency floor for the ingest recommendation
pub const INGEST_CONSISTENCY_FLOOR: f64 = 0.75;

/// Quality floor for the modify recommendation
pub const MODIFY_QUALITY_FLOOR: f64 = 0.5;

/// Final three-way disposition of the produced content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Ingest,
    Modify,
    Discard,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Ingest => "ingest",
            Recommendation::Modify => "modify",
            Recommendation::Discard => "discard",
        }
    }

    /// Map aggregate quality and consistency, both in [0, 1], to a
    /// disposition
    ///
    /// Strong content with weak consistency is sent to modify rather than
    /// discard: the material is usable, its contradictions are not.
    pub fn from_scores(quality: f64, consistency: f64) -> Self {
        if quality >= INGEST_QUALITY_FLOOR && consistency >= INGEST_CONSISTENCY_FLOOR {
            Recommendation::Ingest
        } else if quality >= MODIFY_QUALITY_FLOOR {
            Recommendation::Modify
        } else {
            Recommendation::Discard
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The terminal aggregate of one production request, read-only once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorResult {
    pub reports: Vec<DepartmentReport>,
    /// Cross-department consistency in [0, 1]
    pub consistency: f64,
    /// Fraction of selected departments that completed, in [0, 1]
    pub completeness: f64,
    /// Relevance-weighted aggregate quality in [0, 1]
    pub overall_quality: f64,
    pub decision: QualityDecision,
    pub recommendation: Recommendation,
}

/// Merge department reports into the orchestrator-level result
///
/// `external_consistency` carries the cross-department consistency check
/// when the external validator answered; otherwise consistency falls back
/// to the mean of department-level consistency dimensions.
pub fn aggregate(
    routing: &RoutingDecision,
    reports: Vec<DepartmentReport>,
    external_consistency: Option<f64>,
    policy: &ThresholdPolicy,
) -> OrchestratorResult {
    let selected: Vec<&DepartmentReport> = reports
        .iter()
        .filter(|r| r.status != ReportStatus::NotRelevant)
        .collect();

    let completeness = if selected.is_empty() {
        0.0
    } else {
        selected.iter().filter(|r| r.is_complete()).count() as f64 / selected.len() as f64
    };

    let consistency = match external_consistency {
        Some(value) => clamp_unit(value),
        None => local_consistency(&selected),
    };

    let overall_quality = overall_quality(routing, &selected);

    let decision = policy.decide(
        AssessmentLevel::Overall,
        overall_quality * 100.0,
        consistency * 100.0,
    );
    let recommendation = Recommendation::from_scores(overall_quality, consistency);

    OrchestratorResult {
        reports,
        consistency,
        completeness,
        overall_quality,
        decision,
        recommendation,
    }
}

/// Mean of department-level consistency dimensions, normalized to [0, 1]
fn local_consistency(selected: &[&DepartmentReport]) -> f64 {
    let means: Vec<f64> = selected.iter().filter_map(|r| r.mean_consistency()).collect();
    if means.is_empty() {
        return 0.0;
    }
    clamp_unit(means.iter().sum::<f64>() / means.len() as f64 / 100.0)
}

/// Primary department at a fixed share, remainder split across supporting
/// departments proportional to relevance
fn overall_quality(routing: &RoutingDecision, selected: &[&DepartmentReport]) -> f64 {
    let primary_quality = selected
        .iter()
        .find(|r| r.department == routing.primary.department)
        .map(|r| r.quality)
        .unwrap_or(0.0);

    let supporting: Vec<&&DepartmentReport> = selected
        .iter()
        .filter(|r| r.department != routing.primary.department)
        .collect();

    if supporting.is_empty() {
        return clamp_unit(primary_quality);
    }

    let relevance_total: f64 = supporting.iter().map(|r| r.relevance).sum();
    let supporting_mean = if relevance_total > 0.0 {
        supporting
            .iter()
            .map(|r| r.quality * r.relevance / relevance_total)
            .sum()
    } else {
        supporting.iter().map(|r| r.quality).sum::<f64>() / supporting.len() as f64
    };

    clamp_unit(PRIMARY_SHARE * primary_quality + (1.0 - PRIMARY_SHARE) * supporting_mean)
}
