//! Reconciling grader-reported values with computed ones
//!
//! The grader reports its own overall score and decision label alongside the
//! per-dimension scores. Both are useful signals but neither is trusted
//! outright: the reported score may carry holistic context the weighted sum
//! misses, while a miscalibrated label must not bypass the gate.

use super::decision::QualityDecision;

/// Reported overall scores within this many points of the computed weighted
/// score are preferred over the computed value
pub const SCORE_DRIFT_TOLERANCE: f64 = 5.0;

/// A proposed decision label may differ from the policy decision by at most
/// this many severity tiers before it is overridden
pub const MAX_DECISION_DRIFT: u8 = 1;

/// Choose between the computed weighted score and the grader's own overall
pub fn reconcile_overall(computed: f64, reported: Option<f64>, tolerance: f64) -> f64 {
    match reported {
        Some(reported) if (reported - computed).abs() < tolerance => reported,
        _ => computed,
    }
}

/// Choose between the policy decision and the grader's proposed label
///
/// The label wins only when it sits within one severity tier of the policy
/// decision; anything further off is treated as miscalibration and the
/// policy decision stands.
pub fn reconcile_decision(
    policy_decision: QualityDecision,
    proposed: Option<QualityDecision>,
) -> QualityDecision {
    match proposed {
        Some(label) if label.severity_distance(&policy_decision) <= MAX_DECISION_DRIFT => label,
        _ => policy_decision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_score_within_tolerance_wins() {
        assert_eq!(reconcile_overall(80.0, Some(83.0), SCORE_DRIFT_TOLERANCE), 83.0);
    }

    #[test]
    fn test_reported_score_outside_tolerance_loses() {
        assert_eq!(reconcile_overall(80.0, Some(95.0), SCORE_DRIFT_TOLERANCE), 80.0);
    }

    #[test]
    fn test_missing_reported_score_uses_computed() {
        assert_eq!(reconcile_overall(72.5, None, SCORE_DRIFT_TOLERANCE), 72.5);
    }

    #[test]
    fn test_drift_boundary_is_exclusive() {
        assert_eq!(reconcile_overall(80.0, Some(85.0), SCORE_DRIFT_TOLERANCE), 80.0);
        assert_eq!(reconcile_overall(80.0, Some(84.9), SCORE_DRIFT_TOLERANCE), 84.9);
    }

    #[test]
    fn test_adjacent_label_preferred() {
        assert_eq!(
            reconcile_decision(QualityDecision::Accept, Some(QualityDecision::Retry)),
            QualityDecision::Retry
        );
        assert_eq!(
            reconcile_decision(QualityDecision::Accept, Some(QualityDecision::Exemplary)),
            QualityDecision::Exemplary
        );
    }

    #[test]
    fn test_distant_label_overridden() {
        // A grader calling rejected content exemplary cannot bypass the gate.
        assert_eq!(
            reconcile_decision(QualityDecision::Reject, Some(QualityDecision::Exemplary)),
            QualityDecision::Reject
        );
        assert_eq!(
            reconcile_decision(QualityDecision::Exemplary, Some(QualityDecision::Retry)),
            QualityDecision::Exemplary
        );
    }

    #[test]
    fn test_no_label_uses_policy() {
        assert_eq!(
            reconcile_decision(QualityDecision::Retry, None),
            QualityDecision::Retry
        );
    }
}
