//! Quality decisions and their ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of grading a piece of content
///
/// Ordered by severity: `Reject < Retry < Accept < Exemplary`. Aggregation
/// across assessments takes the minimum, so one bad result can never be
/// averaged away by good ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityDecision {
    Reject,
    Retry,
    Accept,
    Exemplary,
}

impl QualityDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityDecision::Reject => "reject",
            QualityDecision::Retry => "retry",
            QualityDecision::Accept => "accept",
            QualityDecision::Exemplary => "exemplary",
        }
    }

    /// Decision is good enough for the content to be kept
    pub fn is_passing(&self) -> bool {
        matches!(self, QualityDecision::Accept | QualityDecision::Exemplary)
    }

    /// Decision means the content should be regenerated
    pub fn needs_rework(&self) -> bool {
        matches!(self, QualityDecision::Reject | QualityDecision::Retry)
    }

    /// Operator-facing instruction for this decision
    pub fn recommended_action(&self) -> &'static str {
        match self {
            QualityDecision::Reject => {
                "content cannot be used, regenerate with a different approach"
            }
            QualityDecision::Retry => {
                "content needs revision, address the listed issues and resubmit"
            }
            QualityDecision::Accept => "content meets the quality bar, proceed",
            QualityDecision::Exemplary => "content exceeds the quality bar, use as a reference",
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            QualityDecision::Reject => 0,
            QualityDecision::Retry => 1,
            QualityDecision::Accept => 2,
            QualityDecision::Exemplary => 3,
        }
    }

    /// Number of severity tiers between two decisions
    pub fn severity_distance(&self, other: &QualityDecision) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }
}

impl fmt::Display for QualityDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QualityDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "rejected" => Ok(QualityDecision::Reject),
            "retry" | "revise" => Ok(QualityDecision::Retry),
            "accept" | "accepted" | "pass" => Ok(QualityDecision::Accept),
            "exemplary" | "excellent" => Ok(QualityDecision::Exemplary),
            other => Err(format!("unknown quality decision: {}", other)),
        }
    }
}

impl Serialize for QualityDecision {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QualityDecision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_severity() {
        assert!(QualityDecision::Reject < QualityDecision::Retry);
        assert!(QualityDecision::Retry < QualityDecision::Accept);
        assert!(QualityDecision::Accept < QualityDecision::Exemplary);
    }

    #[test]
    fn test_min_takes_worst() {
        let decisions = [
            QualityDecision::Exemplary,
            QualityDecision::Retry,
            QualityDecision::Accept,
        ];
        assert_eq!(
            decisions.iter().min().copied(),
            Some(QualityDecision::Retry)
        );
    }

    #[test]
    fn test_passing_and_rework_partition() {
        for decision in [
            QualityDecision::Reject,
            QualityDecision::Retry,
            QualityDecision::Accept,
            QualityDecision::Exemplary,
        ] {
            assert_ne!(decision.is_passing(), decision.needs_rework());
        }
    }

    #[test]
    fn test_parse_accepts_synonyms() {
        assert_eq!("REJECT".parse::<QualityDecision>(), Ok(QualityDecision::Reject));
        assert_eq!("revise".parse::<QualityDecision>(), Ok(QualityDecision::Retry));
        assert_eq!("pass".parse::<QualityDecision>(), Ok(QualityDecision::Accept));
        assert_eq!("excellent".parse::<QualityDecision>(), Ok(QualityDecision::Exemplary));
        assert!("maybe".parse::<QualityDecision>().is_err());
    }

    #[test]
    fn test_severity_distance_is_symmetric() {
        assert_eq!(
            QualityDecision::Reject.severity_distance(&QualityDecision::Exemplary),
            3
        );
        assert_eq!(
            QualityDecision::Exemplary.severity_distance(&QualityDecision::Reject),
            3
        );
        assert_eq!(
            QualityDecision::Accept.severity_distance(&QualityDecision::Accept),
            0
        );
        assert_eq!(
            QualityDecision::Retry.severity_distance(&QualityDecision::Accept),
            1
        );
    }

    #[test]
    fn test_recommended_action_mentions_rework_for_failures() {
        assert!(QualityDecision::Reject.recommended_action().contains("regenerate"));
        assert!(QualityDecision::Retry.recommended_action().contains("revision"));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&QualityDecision::Exemplary).unwrap();
        assert_eq!(json, "\"exemplary\"");
        let back: QualityDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, QualityDecision::Exemplary);
    }
}
