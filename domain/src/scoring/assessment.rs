//! Immutable quality assessment records

use super::decision::QualityDecision;
use super::dimensions::QualityDimensions;
use super::thresholds::AssessmentLevel;
use crate::core::department::Department;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Result of grading one piece of content
///
/// Assessments are immutable once produced. A regraded piece of content gets
/// a new assessment with a new fingerprint, never an update in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub department: Department,
    pub level: AssessmentLevel,
    pub dimensions: QualityDimensions,
    /// Weighted overall score in [0, 100]
    pub overall: f64,
    pub decision: QualityDecision,
    /// Grader's self-reported certainty in [0, 1], distinct from the
    /// confidence dimension
    pub confidence: f64,
    /// Concrete problems found by the grader
    #[serde(default)]
    pub issues: Vec<String>,
    /// Actionable improvement suggestions
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Free-text explanation from the grader
    #[serde(default)]
    pub reasoning: String,
    /// Content hash binding the assessment to what was graded
    pub fingerprint: String,
    /// Epoch milliseconds when the assessment was produced
    pub assessed_at: u64,
}

impl QualityAssessment {
    /// Hash of content and context identifying what was graded
    ///
    /// The same content graded against different context produces different
    /// fingerprints, so stale cache entries cannot be mistaken for fresh
    /// ones.
    pub fn fingerprint_for(department: &Department, content: &str, context_text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(department.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(content.as_bytes());
        hasher.update([0u8]);
        hasher.update(context_text.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn is_passing(&self) -> bool {
        self.decision.is_passing()
    }
}

/// Current time in epoch milliseconds
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
