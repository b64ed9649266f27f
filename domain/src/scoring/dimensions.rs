//! Quality dimensions — the six axes every assessment is scored on

use crate::core::department::DepartmentClass;
use serde::{Deserialize, Serialize};

/// Clamp a dimension or overall score into [0, 100]
///
/// LLM-reported numbers are untrusted; out-of-range values must never
/// propagate into the data model.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
}

/// Clamp a unit-interval value into [0, 1]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Per-dimension scores in [0, 100]
///
/// Creativity is populated only for creative departments and technical only
/// for technical departments; inactive dimensions stay 0 and are excluded
/// from weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityDimensions {
    pub confidence: f64,
    pub completeness: f64,
    pub relevance: f64,
    pub consistency: f64,
    #[serde(default)]
    pub creativity: f64,
    #[serde(default)]
    pub technical: f64,
}

impl QualityDimensions {
    /// Clamp every dimension and zero the ones inactive for the class
    pub fn sanitized(self, class: DepartmentClass) -> Self {
        Self {
            confidence: clamp_score(self.confidence),
            completeness: clamp_score(self.completeness),
            relevance: clamp_score(self.relevance),
            consistency: clamp_score(self.consistency),
            creativity: match class {
                DepartmentClass::Creative => clamp_score(self.creativity),
                _ => 0.0,
            },
            technical: match class {
                DepartmentClass::Technical => clamp_score(self.technical),
                _ => 0.0,
            },
        }
    }

    /// Dimension names active for a department class
    pub fn active_names(class: DepartmentClass) -> &'static [&'static str] {
        match class {
            DepartmentClass::Creative => {
                &["confidence", "completeness", "relevance", "consistency", "creativity"]
            }
            DepartmentClass::Technical => {
                &["confidence", "completeness", "relevance", "consistency", "technical"]
            }
            DepartmentClass::General => {
                &["confidence", "completeness", "relevance", "consistency"]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_range() {
        assert_eq!(clamp_score(-10.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_score_identity_in_range() {
        for x in [0.0, 0.1, 50.0, 99.9, 100.0] {
            assert_eq!(clamp_score(x), x);
        }
    }

    #[test]
    fn test_sanitize_zeroes_inactive_dimensions() {
        let dims = QualityDimensions {
            confidence: 80.0,
            completeness: 80.0,
            relevance: 80.0,
            consistency: 80.0,
            creativity: 90.0,
            technical: 70.0,
        };

        let creative = dims.sanitized(DepartmentClass::Creative);
        assert_eq!(creative.creativity, 90.0);
        assert_eq!(creative.technical, 0.0);

        let technical = dims.sanitized(DepartmentClass::Technical);
        assert_eq!(technical.creativity, 0.0);
        assert_eq!(technical.technical, 70.0);

        let general = dims.sanitized(DepartmentClass::General);
        assert_eq!(general.creativity, 0.0);
        assert_eq!(general.technical, 0.0);
    }

    #[test]
    fn test_sanitize_clamps_out_of_range() {
        let dims = QualityDimensions {
            confidence: 130.0,
            completeness: -5.0,
            relevance: 50.0,
            consistency: 50.0,
            creativity: 0.0,
            technical: 0.0,
        };

        let sanitized = dims.sanitized(DepartmentClass::General);
        assert_eq!(sanitized.confidence, 100.0);
        assert_eq!(sanitized.completeness, 0.0);
    }

    #[test]
    fn test_active_names_per_class() {
        assert!(QualityDimensions::active_names(DepartmentClass::Creative).contains(&"creativity"));
        assert!(QualityDimensions::active_names(DepartmentClass::Technical).contains(&"technical"));
        assert_eq!(QualityDimensions::active_names(DepartmentClass::General).len(), 4);
    }
}
