//! Tolerant parsing of grader responses
//!
//! Graders are instructed to reply with a strict JSON object, but LLM output
//! drifts: code fences, surrounding prose, missing fields, out-of-range
//! numbers. Parsing recovers what it can and substitutes conservative
//! defaults, so a sloppy response degrades the assessment instead of
//! failing the run.

use super::decision::QualityDecision;
use super::dimensions::{clamp_score, clamp_unit, QualityDimensions};
use crate::core::department::DepartmentClass;
use crate::core::error::DomainError;
use serde::Deserialize;

/// Dimension value substituted when the grader omits a field
///
/// Deliberately below every acceptable band so a missing dimension reads as
/// a weak signal, not a passing one.
pub const MISSING_DIMENSION_DEFAULT: f64 = 50.0;

/// Certainty substituted when the grader omits the field
pub const MISSING_CERTAINTY_DEFAULT: f64 = 0.5;

/// Raw shape of a grader reply before sanitization
#[derive(Debug, Deserialize)]
struct RawAssessment {
    confidence: Option<f64>,
    completeness: Option<f64>,
    relevance: Option<f64>,
    consistency: Option<f64>,
    #[serde(default)]
    creativity: Option<f64>,
    #[serde(default)]
    technical: Option<f64>,
    #[serde(default)]
    overall: Option<f64>,
    /// Self-reported certainty in [0, 1], named to avoid colliding with the
    /// confidence dimension
    #[serde(default)]
    certainty: Option<f64>,
    #[serde(default)]
    decision: Option<String>,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parsed and sanitized grader reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAssessment {
    pub dimensions: QualityDimensions,
    /// Grader's own overall score, if it reported one
    pub reported_overall: Option<f64>,
    /// Self-reported certainty in [0, 1]
    pub certainty: f64,
    /// Decision label proposed by the grader, if it was a valid one
    pub proposed_decision: Option<QualityDecision>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub reasoning: String,
}

/// Strip markdown code fences wrapping a JSON payload
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(without_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag after the opening fence.
    let body = match without_open.find('\n') {
        Some(idx) => &without_open[idx + 1..],
        None => without_open,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Extract the first top-level JSON object from free text
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a grader reply into sanitized dimensions
///
/// Fails only when no JSON object can be found at all; every recoverable
/// defect (missing fields, out-of-range scores, inactive dimensions) is
/// repaired in place.
pub fn parse_assessment(
    response: &str,
    class: DepartmentClass,
) -> Result<ParsedAssessment, DomainError> {
    let stripped = strip_code_fences(response);
    let json = extract_json_object(stripped)
        .ok_or_else(|| DomainError::MalformedAssessment("no JSON object in response".into()))?;

    let raw: RawAssessment = serde_json::from_str(json)
        .map_err(|e| DomainError::MalformedAssessment(format!("invalid assessment JSON: {}", e)))?;

    let dimensions = QualityDimensions {
        confidence: clamp_score(raw.confidence.unwrap_or(MISSING_DIMENSION_DEFAULT)),
        completeness: clamp_score(raw.completeness.unwrap_or(MISSING_DIMENSION_DEFAULT)),
        relevance: clamp_score(raw.relevance.unwrap_or(MISSING_DIMENSION_DEFAULT)),
        consistency: clamp_score(raw.consistency.unwrap_or(MISSING_DIMENSION_DEFAULT)),
        creativity: raw.creativity.map(clamp_score).unwrap_or(match class {
            DepartmentClass::Creative => MISSING_DIMENSION_DEFAULT,
            _ => 0.0,
        }),
        technical: raw.technical.map(clamp_score).unwrap_or(match class {
            DepartmentClass::Technical => MISSING_DIMENSION_DEFAULT,
            _ => 0.0,
        }),
    }
    .sanitized(class);

    Ok(ParsedAssessment {
        dimensions,
        reported_overall: raw.overall.map(clamp_score),
        certainty: clamp_unit(raw.certainty.unwrap_or(MISSING_CERTAINTY_DEFAULT)),
        // An unrecognized label is dropped rather than failing the parse.
        proposed_decision: raw.decision.and_then(|s| s.parse().ok()),
        issues: raw.issues.into_iter().filter(|s| !s.trim().is_empty()).collect(),
        suggestions: raw.suggestions.into_iter().filter(|s| !s.trim().is_empty()).collect(),
        reasoning: raw.reasoning.unwrap_or_default(),
    })
}
