//! Per-department scoring weights
//!
//! Different departments value different qualities: narrative departments
//! weight creativity and consistency heavily, technical departments weight
//! technical execution above creativity. The table is declarative data, not
//! logic, and is validated against the sum-to-1.0 invariant.

use super::dimensions::QualityDimensions;
use crate::core::department::Department;
use serde::{Deserialize, Serialize};

/// Tolerance for the sum-to-1.0 invariant
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// One weight in [0, 1] per quality dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub confidence: f64,
    pub completeness: f64,
    pub relevance: f64,
    pub consistency: f64,
    pub creativity: f64,
    pub technical: f64,
}

impl ScoringWeights {
    /// Equal weight across the four core dimensions
    ///
    /// Used for departments with no dedicated entry in the table.
    pub fn balanced() -> Self {
        Self {
            confidence: 0.25,
            completeness: 0.25,
            relevance: 0.25,
            consistency: 0.25,
            creativity: 0.0,
            technical: 0.0,
        }
    }

    fn sum(&self) -> f64 {
        self.confidence
            + self.completeness
            + self.relevance
            + self.consistency
            + self.creativity
            + self.technical
    }
}

/// Lookup table mapping departments to their scoring weights
#[derive(Debug, Clone, Default)]
pub struct WeightTable;

impl WeightTable {
    pub fn new() -> Self {
        Self
    }

    /// Weights for a department, falling back to balanced weights for
    /// departments without a dedicated entry
    pub fn weights_for(&self, department: &Department) -> ScoringWeights {
        match department {
            Department::Story => ScoringWeights {
                confidence: 0.15,
                completeness: 0.20,
                relevance: 0.15,
                consistency: 0.25,
                creativity: 0.25,
                technical: 0.0,
            },
            Department::Character => ScoringWeights {
                confidence: 0.10,
                completeness: 0.20,
                relevance: 0.15,
                consistency: 0.30,
                creativity: 0.25,
                technical: 0.0,
            },
            Department::Worldbuilding => ScoringWeights {
                confidence: 0.10,
                completeness: 0.25,
                relevance: 0.10,
                consistency: 0.35,
                creativity: 0.20,
                technical: 0.0,
            },
            Department::Visual => ScoringWeights {
                confidence: 0.15,
                completeness: 0.20,
                relevance: 0.20,
                consistency: 0.15,
                creativity: 0.30,
                technical: 0.0,
            },
            Department::Audio => ScoringWeights {
                confidence: 0.10,
                completeness: 0.20,
                relevance: 0.15,
                consistency: 0.15,
                creativity: 0.0,
                technical: 0.40,
            },
            Department::Video => ScoringWeights {
                confidence: 0.10,
                completeness: 0.15,
                relevance: 0.15,
                consistency: 0.20,
                creativity: 0.0,
                technical: 0.40,
            },
            Department::Custom(_) => ScoringWeights::balanced(),
        }
    }

    /// Check the sum-to-1.0 invariant within tolerance
    pub fn validate(weights: &ScoringWeights) -> bool {
        (weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Dot product of dimensions and weights
    ///
    /// Dimensions at 0 contribute nothing, so a completely empty dimension
    /// set yields 0.0 rather than an error. Partial assessments are valid
    /// input.
    pub fn weighted_score(dimensions: &QualityDimensions, weights: &ScoringWeights) -> f64 {
        dimensions.confidence * weights.confidence
            + dimensions.completeness * weights.completeness
            + dimensions.relevance * weights.relevance
            + dimensions.consistency * weights.consistency
            + dimensions.creativity * weights.creativity
            + dimensions.technical * weights.technical
    }
}
