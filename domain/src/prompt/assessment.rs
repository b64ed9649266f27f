//! Prompt templates for the grading flow

use crate::core::department::Department;
use crate::scoring::dimensions::QualityDimensions;

/// Templates for generating prompts at each grading stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the structured assessment
    pub fn assessment_system() -> &'static str {
        r#"You are a rigorous quality assessor for creative production content.
Your task is to grade the given content objectively against the listed dimensions.
Score each dimension from 0 to 100. Be strict: a score above 90 means the content
could ship as-is. Identify concrete issues and actionable suggestions.
Respond with a single raw JSON object and nothing else."#
    }

    /// User prompt for the structured assessment
    ///
    /// Names exactly the dimensions active for the department's class so the
    /// grader never scores an axis that is excluded from weighting.
    pub fn assessment_prompt(
        content: &str,
        department: &Department,
        task: Option<&str>,
        expected_outcome: Option<&str>,
        context_text: &str,
    ) -> String {
        let dimensions = QualityDimensions::active_names(department.class());

        let mut prompt = format!(
            r#"Assess the following content produced by the {} department.
"#,
            department
        );

        if let Some(task) = task {
            prompt.push_str(&format!("Task given to the producer: {}\n", task));
        }
        if let Some(expected) = expected_outcome {
            prompt.push_str(&format!("Expected outcome: {}\n", expected));
        }
        if !context_text.is_empty() {
            prompt.push_str(&format!(
                "\nEstablished project context:\n{}\n",
                context_text
            ));
        }

        prompt.push_str(&format!(
            r#"
Content to assess:
---
{}
---

Score these dimensions from 0 to 100: {}.

Respond with exactly this JSON shape:
{{
  {},
  "overall": <0-100>,
  "certainty": <0.0-1.0, how certain you are of this assessment>,
  "decision": "<reject|retry|accept|exemplary>",
  "issues": ["<concrete problem>", ...],
  "suggestions": ["<actionable improvement>", ...],
  "reasoning": "<2-3 sentences>"
}}"#,
            content,
            dimensions.join(", "),
            dimensions
                .iter()
                .map(|d| format!("\"{}\": <0-100>", d))
                .collect::<Vec<_>>()
                .join(",\n  "),
        ));

        prompt
    }

    /// System prompt for the quick pre-filter check
    pub fn quick_check_system() -> &'static str {
        r#"You are a fast quality pre-filter for creative production content.
Give a single overall quality score from 0 to 100. Do not explain.
Respond with a single raw JSON object and nothing else."#
    }

    /// User prompt for the quick pre-filter check
    pub fn quick_check_prompt(content: &str, department: &Department) -> String {
        format!(
            r#"Rate this {} department content from 0 to 100.

Content:
---
{}
---

Respond with exactly: {{"score": <0-100>}}"#,
            department, content
        )
    }

    /// System prompt for the consistency-only check
    pub fn consistency_system() -> &'static str {
        r#"You are a continuity checker for creative production content.
Your only task is to find contradictions between new content and established facts.
Score consistency from 0 to 100, where 100 means no contradiction at all.
Respond with a single raw JSON object and nothing else."#
    }

    /// User prompt for the consistency-only check
    pub fn consistency_prompt(content: &str, existing_context: &str, department: &Department) -> String {
        format!(
            r#"Established facts:
---
{}
---

New {} department content:
---
{}
---

Respond with exactly:
{{"consistency": <0-100>, "contradictions": ["<each contradiction found>", ...]}}"#,
            existing_context, department, content
        )
    }
}
