//! Threshold policy mapping scores to decisions
//!
//! Thresholds tighten as assessments aggregate upward: a specialist draft is
//! judged more leniently than a department result, which is judged more
//! leniently than the overall production. Rejection takes precedence over
//! every other band, and consistency can only downgrade a decision, never
//! upgrade one.

use super::decision::QualityDecision;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in the aggregation hierarchy an assessment sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentLevel {
    Specialist,
    Department,
    Overall,
}

impl fmt::Display for AssessmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessmentLevel::Specialist => "specialist",
            AssessmentLevel::Department => "department",
            AssessmentLevel::Overall => "overall",
        };
        write!(f, "{}", s)
    }
}

/// Score cutoffs for one assessment level
///
/// The four score thresholds are strictly ascending. `excellent` marks the
/// top of the scale for reporting; the exemplary decision itself requires
/// `good` plus strong consistency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Below this the content is rejected outright
    pub minimum: f64,
    /// Below this (but at or above minimum) the content goes back for retry
    pub acceptable: f64,
    /// At or above this, with good consistency, the content is exemplary
    pub good: f64,
    /// Top of the scale, used for reporting labels
    pub excellent: f64,
    /// Consistency below this forces a retry even when the overall score passes
    pub consistency_min: f64,
    /// Consistency required for the exemplary decision
    pub consistency_good: f64,
}

impl ThresholdBand {
    /// Score thresholds must be strictly ascending and within [0, 100]
    pub fn is_valid(&self) -> bool {
        let ordered = self.minimum < self.acceptable
            && self.acceptable < self.good
            && self.good < self.excellent;
        let in_range = [
            self.minimum,
            self.acceptable,
            self.good,
            self.excellent,
            self.consistency_min,
            self.consistency_good,
        ]
        .iter()
        .all(|v| (0.0..=100.0).contains(v));
        ordered && in_range && self.consistency_min <= self.consistency_good
    }

    /// Human-readable label for a score against this band
    pub fn label(&self, score: f64) -> &'static str {
        if score >= self.excellent {
            "excellent"
        } else if score >= self.good {
            "good"
        } else if score >= self.acceptable {
            "acceptable"
        } else if score >= self.minimum {
            "weak"
        } else {
            "unusable"
        }
    }
}

/// Per-level threshold bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    pub specialist: ThresholdBand,
    pub department: ThresholdBand,
    pub overall: ThresholdBand,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            specialist: ThresholdBand {
                minimum: 60.0,
                acceptable: 75.0,
                good: 90.0,
                excellent: 95.0,
                consistency_min: 70.0,
                consistency_good: 85.0,
            },
            department: ThresholdBand {
                minimum: 65.0,
                acceptable: 78.0,
                good: 88.0,
                excellent: 94.0,
                consistency_min: 72.0,
                consistency_good: 85.0,
            },
            overall: ThresholdBand {
                minimum: 70.0,
                acceptable: 80.0,
                good: 90.0,
                excellent: 96.0,
                consistency_min: 75.0,
                consistency_good: 88.0,
            },
        }
    }
}

impl ThresholdPolicy {
    pub fn band(&self, level: AssessmentLevel) -> &ThresholdBand {
        match level {
            AssessmentLevel::Specialist => &self.specialist,
            AssessmentLevel::Department => &self.department,
            AssessmentLevel::Overall => &self.overall,
        }
    }

    /// Map an overall score and consistency score to a decision
    ///
    /// Evaluation order is fixed: rejection first, then the retry band
    /// (including the consistency floor), then exemplary, then accept.
    pub fn decide(&self, level: AssessmentLevel, overall: f64, consistency: f64) -> QualityDecision {
        let band = self.band(level);

        if overall < band.minimum {
            return QualityDecision::Reject;
        }
        if overall < band.acceptable || consistency < band.consistency_min {
            return QualityDecision::Retry;
        }
        if overall >= band.good && consistency >= band.consistency_good {
            return QualityDecision::Exemplary;
        }
        QualityDecision::Accept
    }

    /// True exactly when the decision for these scores is reject or retry
    pub fn requires_attention(&self, level: AssessmentLevel, overall: f64, consistency: f64) -> bool {
        self.decide(level, overall, consistency).needs_rework()
    }

    pub fn is_valid(&self) -> bool {
        self.specialist.is_valid() && self.department.is_valid() && self.overall.is_valid()
    }
}
