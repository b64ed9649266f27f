//! Run Department use case
//!
//! The department head: asks the runner for specialist outputs, grades each
//! one through the quality assessor, and folds the gradings into a single
//! department report. Grading runs sequentially inside the department;
//! concurrency lives at the tier level.

use crate::ports::department_runner::DepartmentRunner;
use crate::ports::scoring_gateway::ScoringGateway;
use crate::use_cases::assess_quality::{AssessQualityInput, AssessQualityUseCase};
use crate::use_cases::execute_plan::DepartmentExecutor;
use async_trait::async_trait;
use greenlight_domain::{
    AssessmentLevel, Department, DepartmentReport, ProductionRequest, SpecialistGrading,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for producing and grading one department's work
pub struct RunDepartmentUseCase<G: ScoringGateway + 'static> {
    runner: Arc<dyn DepartmentRunner>,
    assessor: Arc<AssessQualityUseCase<G>>,
}

impl<G: ScoringGateway + 'static> RunDepartmentUseCase<G> {
    pub fn new(runner: Arc<dyn DepartmentRunner>, assessor: Arc<AssessQualityUseCase<G>>) -> Self {
        Self { runner, assessor }
    }
}

#[async_trait]
impl<G: ScoringGateway + 'static> DepartmentExecutor for RunDepartmentUseCase<G> {
    /// Produce, grade, and report
    ///
    /// Runner trouble fails the whole department. A specialist whose grading
    /// call fails is dropped with an issue on the report; the department
    /// still completes on the gradings that did come back.
    async fn execute_department(
        &self,
        department: &Department,
        relevance: f64,
        request: &ProductionRequest,
        upstream: &[DepartmentReport],
    ) -> DepartmentReport {
        let outputs = match self.runner.run(department, request, upstream).await {
            Ok(outputs) => outputs,
            Err(e) => {
                warn!("Department {} failed to run: {}", department, e);
                return DepartmentReport::failed(department.clone(), relevance, e.to_string());
            }
        };
        if outputs.is_empty() {
            return DepartmentReport::failed(
                department.clone(),
                relevance,
                "no specialist output produced",
            );
        }
        debug!(
            "Grading {} specialist output(s) for {}",
            outputs.len(),
            department
        );

        let mut gradings: Vec<SpecialistGrading> = Vec::new();
        let mut ungraded: Vec<String> = Vec::new();
        for output in &outputs {
            let mut input = AssessQualityInput::new(&output.content, department.clone())
                .with_task(&request.brief)
                .at_level(AssessmentLevel::Specialist);
            if let Some(context) = &request.context {
                input = input.with_context(context.clone());
            }

            match self.assessor.execute(input).await {
                Ok(assessment) => gradings.push(SpecialistGrading::new(output, assessment)),
                Err(e) => {
                    warn!(
                        "Specialist {} in {} could not be graded: {}",
                        output.role, department, e
                    );
                    ungraded.push(format!("specialist {} not graded: {}", output.role, e));
                }
            }
        }

        if gradings.is_empty() {
            let mut report = DepartmentReport::failed(
                department.clone(),
                relevance,
                "no specialist output could be graded",
            );
            report.issues.extend(ungraded);
            return report;
        }

        let mut report = DepartmentReport::complete(department.clone(), relevance, gradings);
        report.issues.extend(ungraded);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringBehavior;
    use crate::ports::department_runner::DepartmentRunError;
    use crate::ports::scoring_gateway::{
        ChatCompletion, ChatMessage, ChatOptions, ScoringGatewayError,
    };
    use greenlight_domain::{
        QualityDecision, ReportStatus, SpecialistOutput, SpecialistVerdict, ThresholdPolicy,
    };
    use std::sync::Mutex;

    struct FixedRunner {
        outputs: Result<Vec<SpecialistOutput>, ()>,
    }

    #[async_trait]
    impl DepartmentRunner for FixedRunner {
        async fn run(
            &self,
            department: &Department,
            _request: &ProductionRequest,
            _upstream: &[DepartmentReport],
        ) -> Result<Vec<SpecialistOutput>, DepartmentRunError> {
            self.outputs
                .clone()
                .map_err(|_| DepartmentRunError::NoSpecialists(department.to_string()))
        }
    }

    /// Replays one canned reply per call, in order; an exhausted or None
    /// slot turns into a gateway timeout.
    struct SequenceGateway {
        replies: Mutex<Vec<Option<String>>>,
    }

    impl SequenceGateway {
        fn new(replies: Vec<Option<&str>>) -> Self {
            Self {
                replies: Mutex::new(
                    replies.into_iter().map(|r| r.map(String::from)).collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl ScoringGateway for SequenceGateway {
        async fn chat_complete(
            &self,
            _messages: &[ChatMessage],
            _options: ChatOptions,
        ) -> Result<ChatCompletion, ScoringGatewayError> {
            let mut replies = self.replies.lock().unwrap();
            let next = if replies.is_empty() {
                None
            } else {
                replies.remove(0)
            };
            match next {
                Some(content) => Ok(ChatCompletion {
                    content,
                    model: "fake".into(),
                    prompt_tokens: 0,
                    completion_tokens: 0,
                    finish_reason: Some("stop".into()),
                }),
                None => Err(ScoringGatewayError::Timeout),
            }
        }
    }

    const GOOD_REPLY: &str = r#"{"confidence": 85, "completeness": 80, "relevance": 85, "consistency": 88, "creativity": 90, "overall": 86, "certainty": 0.8, "decision": "accept", "issues": [], "suggestions": [], "reasoning": "solid"}"#;
    const WEAK_REPLY: &str = r#"{"confidence": 35, "completeness": 30, "relevance": 40, "consistency": 30, "creativity": 45, "certainty": 0.7, "decision": "reject", "issues": ["incoherent"], "suggestions": [], "reasoning": "unusable"}"#;

    fn use_case(
        outputs: Result<Vec<SpecialistOutput>, ()>,
        replies: Vec<Option<&str>>,
    ) -> RunDepartmentUseCase<SequenceGateway> {
        let assessor = AssessQualityUseCase::new(
            Arc::new(SequenceGateway::new(replies)),
            ThresholdPolicy::default(),
            ScoringBehavior::default(),
        );
        RunDepartmentUseCase::new(Arc::new(FixedRunner { outputs }), Arc::new(assessor))
    }

    fn request() -> ProductionRequest {
        ProductionRequest::new("proj-1", "A rooftop chase at dusk")
    }

    #[tokio::test]
    async fn test_grades_every_specialist() {
        let outputs = vec![
            SpecialistOutput::new("scene-writer", "The chase begins."),
            SpecialistOutput::new("dialogue-writer", "\"Stop right there!\""),
        ];
        let use_case = use_case(Ok(outputs), vec![Some(GOOD_REPLY), Some(WEAK_REPLY)]);

        let report = use_case
            .execute_department(&Department::Story, 0.9, &request(), &[])
            .await;

        assert_eq!(report.status, ReportStatus::Complete);
        assert_eq!(report.gradings.len(), 2);
        assert_eq!(report.gradings[0].verdict, SpecialistVerdict::Accepted);
        assert_eq!(report.gradings[1].verdict, SpecialistVerdict::Discarded);
        assert_eq!(report.gradings[1].assessment.decision, QualityDecision::Reject);
        assert!(report.accepted_content().contains("The chase begins."));
        assert!(!report.accepted_content().contains("Stop right there"));
    }

    #[tokio::test]
    async fn test_runner_failure_fails_department() {
        let use_case = use_case(Err(()), vec![]);

        let report = use_case
            .execute_department(&Department::Audio, 0.5, &request(), &[])
            .await;

        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.issues[0].contains("no specialists"));
    }

    #[tokio::test]
    async fn test_empty_output_fails_department() {
        let use_case = use_case(Ok(vec![]), vec![]);

        let report = use_case
            .execute_department(&Department::Story, 0.9, &request(), &[])
            .await;

        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.issues[0].contains("no specialist output"));
    }

    #[tokio::test]
    async fn test_ungradeable_specialist_is_dropped_with_issue() {
        let outputs = vec![
            SpecialistOutput::new("scene-writer", "The chase begins."),
            SpecialistOutput::new("dialogue-writer", "\"Stop!\""),
        ];
        let use_case = use_case(Ok(outputs), vec![Some(GOOD_REPLY), None]);

        let report = use_case
            .execute_department(&Department::Story, 0.9, &request(), &[])
            .await;

        assert_eq!(report.status, ReportStatus::Complete);
        assert_eq!(report.gradings.len(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.contains("dialogue-writer not graded")));
    }

    #[tokio::test]
    async fn test_all_gradings_failing_fails_department() {
        let outputs = vec![SpecialistOutput::new("scene-writer", "The chase begins.")];
        let use_case = use_case(Ok(outputs), vec![None]);

        let report = use_case
            .execute_department(&Department::Story, 0.9, &request(), &[])
            .await;

        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.issues[0].contains("could be graded"));
    }
}
