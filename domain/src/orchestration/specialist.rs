//! Specialist outputs and their gradings
//!
//! A department head runs several specialists, grades each output, and
//! keeps only what passes. The verdict per specialist is derived from the
//! threshold decision, never chosen freely.

use crate::scoring::assessment::QualityAssessment;
use crate::scoring::decision::QualityDecision;
use serde::{Deserialize, Serialize};

/// One specialist's produced content, before grading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistOutput {
    /// Role of the specialist within the department (e.g. "dialogue-writer")
    pub role: String,
    pub content: String,
    /// Weight of this specialist within the department, if declared
    #[serde(default)]
    pub relevance: Option<f64>,
}

impl SpecialistOutput {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            relevance: None,
        }
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = Some(relevance);
        self
    }
}

/// What the department does with a graded specialist output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistVerdict {
    Accepted,
    RevisionRequested,
    Discarded,
}

impl SpecialistVerdict {
    pub fn from_decision(decision: QualityDecision) -> Self {
        match decision {
            QualityDecision::Accept | QualityDecision::Exemplary => SpecialistVerdict::Accepted,
            QualityDecision::Retry => SpecialistVerdict::RevisionRequested,
            QualityDecision::Reject => SpecialistVerdict::Discarded,
        }
    }
}

/// A specialist output together with its assessment and verdict
///
/// The produced content is kept on the grading so downstream departments
/// and the external consistency check can read accepted output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistGrading {
    pub role: String,
    /// Weight of this specialist within the department, if declared
    #[serde(default)]
    pub relevance: Option<f64>,
    pub content: String,
    pub assessment: QualityAssessment,
    pub verdict: SpecialistVerdict,
}

impl SpecialistGrading {
    pub fn new(output: &SpecialistOutput, assessment: QualityAssessment) -> Self {
        let verdict = SpecialistVerdict::from_decision(assessment.decision);
        Self {
            role: output.role.clone(),
            relevance: output.relevance,
            content: output.content.clone(),
            assessment,
            verdict,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict == SpecialistVerdict::Accepted
    }
}

/// Department quality in [0, 1] from accepted specialist gradings
///
/// The mean is weighted by specialist relevance when every accepted grading
/// declares one; otherwise it is unweighted. No accepted gradings means
/// zero quality, not an error.
pub fn department_quality(gradings: &[SpecialistGrading]) -> f64 {
    let accepted: Vec<&SpecialistGrading> =
        gradings.iter().filter(|g| g.is_accepted()).collect();
    if accepted.is_empty() {
        return 0.0;
    }

    let weighted = accepted.iter().all(|g| g.relevance.is_some());
    let (sum, total) = accepted.iter().fold((0.0, 0.0), |(sum, total), g| {
        let w = if weighted { g.relevance.unwrap_or(0.0) } else { 1.0 };
        (sum + g.assessment.overall * w, total + w)
    });

    if total <= 0.0 {
        return 0.0;
    }
    (sum / total / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::department::Department;
    use crate::scoring::assessment::current_timestamp;
    use crate::scoring::dimensions::QualityDimensions;
    use crate::scoring::thresholds::AssessmentLevel;

    fn grading(role: &str, overall: f64, decision: QualityDecision) -> SpecialistGrading {
        let output = SpecialistOutput::new(role, "content");
        let assessment = QualityAssessment {
            department: Department::Story,
            level: AssessmentLevel::Specialist,
            dimensions: QualityDimensions::default(),
            overall,
            decision,
            confidence: 0.8,
            issues: vec![],
            suggestions: vec![],
            reasoning: String::new(),
            fingerprint: String::new(),
            assessed_at: current_timestamp(),
        };
        SpecialistGrading::new(&output, assessment)
    }

    #[test]
    fn test_verdict_derived_from_decision() {
        assert!(grading("a", 90.0, QualityDecision::Exemplary).is_accepted());
        assert!(grading("a", 80.0, QualityDecision::Accept).is_accepted());
        assert_eq!(
            grading("a", 65.0, QualityDecision::Retry).verdict,
            SpecialistVerdict::RevisionRequested
        );
        assert_eq!(
            grading("a", 40.0, QualityDecision::Reject).verdict,
            SpecialistVerdict::Discarded
        );
    }

    #[test]
    fn test_quality_is_unweighted_mean_of_accepted() {
        let gradings = vec![
            grading("a", 80.0, QualityDecision::Accept),
            grading("b", 90.0, QualityDecision::Accept),
            grading("c", 30.0, QualityDecision::Reject),
        ];
        let quality = department_quality(&gradings);
        assert!((quality - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_quality_weighted_when_all_declare_relevance() {
        let mut high = grading("a", 100.0, QualityDecision::Accept);
        high.relevance = Some(3.0);
        let mut low = grading("b", 60.0, QualityDecision::Accept);
        low.relevance = Some(1.0);

        let quality = department_quality(&[high, low]);
        assert!((quality - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_no_accepted_gradings_yields_zero() {
        let gradings = vec![grading("a", 40.0, QualityDecision::Reject)];
        assert_eq!(department_quality(&gradings), 0.0);
        assert_eq!(department_quality(&[]), 0.0);
    }
}
