//! Department reports
//!
//! Each department task owns exactly one report from launch to aggregation.
//! Failures land in the report's issues list instead of propagating as
//! errors, so one bad department never takes down the tier.

use super::specialist::{department_quality, SpecialistGrading};
use crate::core::department::Department;
use serde::{Deserialize, Serialize};

/// Terminal status of a department within one production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Routing excluded the department; nothing ran
    NotRelevant,
    /// All specialists ran and were graded
    Complete,
    /// The department task failed; work remains outstanding
    Pending,
    /// An upstream dependency failed, so this department never started
    Skipped,
}

/// Outcome of one department's work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub department: Department,
    /// Relevance in [0, 1] from routing
    pub relevance: f64,
    pub status: ReportStatus,
    #[serde(default)]
    pub gradings: Vec<SpecialistGrading>,
    /// Aggregate department quality in [0, 1]
    pub quality: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl DepartmentReport {
    /// Report for a department routing excluded
    pub fn not_relevant(department: Department) -> Self {
        Self {
            department,
            relevance: 0.0,
            status: ReportStatus::NotRelevant,
            gradings: Vec::new(),
            quality: 0.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Report for a successfully completed department
    ///
    /// Quality and rolled-up issues/suggestions are derived from the
    /// gradings; issues of discarded specialists are kept because they
    /// explain what is missing from the accepted set.
    pub fn complete(department: Department, relevance: f64, gradings: Vec<SpecialistGrading>) -> Self {
        let quality = department_quality(&gradings);
        let issues = gradings.iter().flat_map(|g| g.assessment.issues.clone()).collect();
        let suggestions = gradings
            .iter()
            .flat_map(|g| g.assessment.suggestions.clone())
            .collect();
        Self {
            department,
            relevance,
            status: ReportStatus::Complete,
            gradings,
            quality,
            issues,
            suggestions,
        }
    }

    /// Report for a department whose task failed mid-flight
    pub fn failed(department: Department, relevance: f64, reason: impl Into<String>) -> Self {
        Self {
            department,
            relevance,
            status: ReportStatus::Pending,
            gradings: Vec::new(),
            quality: 0.0,
            issues: vec![reason.into()],
            suggestions: Vec::new(),
        }
    }

    /// Report for a department skipped because a dependency failed
    pub fn skipped(department: Department, relevance: f64, dependency: &Department) -> Self {
        Self {
            department,
            relevance,
            status: ReportStatus::Skipped,
            gradings: Vec::new(),
            quality: 0.0,
            issues: vec![format!("skipped: dependency {} did not complete", dependency)],
            suggestions: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ReportStatus::Complete
    }

    /// Accepted specialist content, concatenated in grading order
    ///
    /// This is what downstream departments and the external consistency
    /// check read; rejected and revision-bound output never leaves the
    /// department.
    pub fn accepted_content(&self) -> String {
        self.gradings
            .iter()
            .filter(|g| g.is_accepted())
            .map(|g| g.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Mean consistency dimension across gradings, in [0, 100]
    ///
    /// Used as the local fallback when the external consistency check is
    /// unavailable. Reports with no gradings return none so they do not
    /// drag the mean down artificially.
    pub fn mean_consistency(&self) -> Option<f64> {
        if self.gradings.is_empty() {
            return None;
        }
        let sum: f64 = self
            .gradings
            .iter()
            .map(|g| g.assessment.dimensions.consistency)
            .sum();
        Some(sum / self.gradings.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::specialist::SpecialistOutput;
    use crate::scoring::assessment::{current_timestamp, QualityAssessment};
    use crate::scoring::decision::QualityDecision;
    use crate::scoring::dimensions::QualityDimensions;
    use crate::scoring::thresholds::AssessmentLevel;

    fn grading(overall: f64, consistency: f64, decision: QualityDecision) -> SpecialistGrading {
        let output = SpecialistOutput::new("writer", "content");
        let assessment = QualityAssessment {
            department: Department::Story,
            level: AssessmentLevel::Specialist,
            dimensions: QualityDimensions {
                consistency,
                ..Default::default()
            },
            overall,
            decision,
            confidence: 0.8,
            issues: vec!["weak ending".into()],
            suggestions: vec!["foreshadow earlier".into()],
            reasoning: String::new(),
            fingerprint: String::new(),
            assessed_at: current_timestamp(),
        };
        SpecialistGrading::new(&output, assessment)
    }

    #[test]
    fn test_complete_rolls_up_issues_and_quality() {
        let report = DepartmentReport::complete(
            Department::Story,
            0.9,
            vec![grading(80.0, 85.0, QualityDecision::Accept)],
        );
        assert!(report.is_complete());
        assert!((report.quality - 0.8).abs() < 1e-9);
        assert_eq!(report.issues, vec!["weak ending"]);
        assert_eq!(report.suggestions, vec!["foreshadow earlier"]);
    }

    #[test]
    fn test_failed_report_is_pending_with_issue() {
        let report = DepartmentReport::failed(Department::Audio, 0.5, "scoring call timed out");
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.quality, 0.0);
        assert_eq!(report.issues, vec!["scoring call timed out"]);
    }

    #[test]
    fn test_skipped_report_names_dependency() {
        let report = DepartmentReport::skipped(Department::Visual, 0.7, &Department::Character);
        assert_eq!(report.status, ReportStatus::Skipped);
        assert!(report.issues[0].contains("character"));
    }

    #[test]
    fn test_accepted_content_excludes_rejected_output() {
        let accepted = grading(85.0, 85.0, QualityDecision::Accept);
        let mut rejected = grading(40.0, 40.0, QualityDecision::Reject);
        rejected.content = "unusable draft".into();

        let report = DepartmentReport::complete(Department::Story, 0.9, vec![accepted, rejected]);
        assert!(report.accepted_content().contains("content"));
        assert!(!report.accepted_content().contains("unusable draft"));
    }

    #[test]
    fn test_mean_consistency() {
        let report = DepartmentReport::complete(
            Department::Story,
            0.9,
            vec![
                grading(80.0, 80.0, QualityDecision::Accept),
                grading(85.0, 90.0, QualityDecision::Accept),
            ],
        );
        assert_eq!(report.mean_consistency(), Some(85.0));
        assert_eq!(DepartmentReport::not_relevant(Department::Video).mean_consistency(), None);
    }
}
