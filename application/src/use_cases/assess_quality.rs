//! Assess Quality use case
//!
//! Grades one piece of content: builds the assessment prompt, calls the
//! scoring gateway, validates and clamps the structured response, computes
//! the weighted overall score, derives the decision, and memoizes the result
//! by content fingerprint.

use crate::config::ScoringBehavior;
use crate::ports::assessment_cache::AssessmentCache;
use crate::ports::scoring_gateway::{ChatOptions, ScoringGateway, ScoringGatewayError};
use greenlight_domain::scoring::parsing::strip_code_fences;
use greenlight_domain::scoring::reconcile::SCORE_DRIFT_TOLERANCE;
use greenlight_domain::{
    clamp_score, current_timestamp, parse_assessment, reconcile_decision, reconcile_overall,
    AssessmentLevel, Department, DomainError, ProjectContext, PromptTemplate, QualityAssessment,
    ThresholdPolicy, WeightTable,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during quality assessment
#[derive(Error, Debug)]
pub enum AssessQualityError {
    #[error("Scoring failed: {0}")]
    ScoringFailed(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] ScoringGatewayError),
}

impl From<DomainError> for AssessQualityError {
    fn from(error: DomainError) -> Self {
        AssessQualityError::ScoringFailed(error.to_string())
    }
}

/// Input for the AssessQuality use case
#[derive(Debug, Clone)]
pub struct AssessQualityInput {
    pub content: String,
    pub department: Department,
    /// Task the producer was given, shown to the grader
    pub task: Option<String>,
    /// What the caller expected the producer to deliver
    pub expected_outcome: Option<String>,
    pub context: Option<ProjectContext>,
    pub level: AssessmentLevel,
}

impl AssessQualityInput {
    pub fn new(content: impl Into<String>, department: Department) -> Self {
        Self {
            content: content.into(),
            department,
            task: None,
            expected_outcome: None,
            context: None,
            level: AssessmentLevel::Specialist,
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn with_expected_outcome(mut self, expected: impl Into<String>) -> Self {
        self.expected_outcome = Some(expected.into());
        self
    }

    pub fn with_context(mut self, context: ProjectContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn at_level(mut self, level: AssessmentLevel) -> Self {
        self.level = level;
        self
    }
}

/// Result of a consistency-only check
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyCheck {
    /// Consistency in [0, 100]
    pub score: f64,
    pub contradictions: Vec<String>,
}

/// Use case for grading content quality
pub struct AssessQualityUseCase<G: ScoringGateway + 'static> {
    gateway: Arc<G>,
    cache: Option<Arc<dyn AssessmentCache>>,
    weights: WeightTable,
    policy: ThresholdPolicy,
    behavior: ScoringBehavior,
}

impl<G: ScoringGateway + 'static> AssessQualityUseCase<G> {
    pub fn new(gateway: Arc<G>, policy: ThresholdPolicy, behavior: ScoringBehavior) -> Self {
        Self {
            gateway,
            cache: None,
            weights: WeightTable::new(),
            policy,
            behavior,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn AssessmentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Grade one piece of content
    ///
    /// A cache hit returns the stored assessment bit-identical to the
    /// original; no re-randomization. A malformed grader response surfaces
    /// as an error rather than a defaulted assessment so the caller decides
    /// whether to retry or skip.
    pub async fn execute(
        &self,
        input: AssessQualityInput,
    ) -> Result<QualityAssessment, AssessQualityError> {
        let context_text = input
            .context
            .as_ref()
            .map(|c| c.as_prompt_text())
            .unwrap_or_default();
        let fingerprint =
            QualityAssessment::fingerprint_for(&input.department, &input.content, &context_text);
        let cache_key = format!("assess:{}:{}", input.department, fingerprint);

        if let Some(cached) = self.cache_lookup(&cache_key).await {
            debug!("Assessment cache hit for {}", input.department);
            return Ok(cached);
        }

        let prompt = PromptTemplate::assessment_prompt(
            &input.content,
            &input.department,
            input.task.as_deref(),
            input.expected_outcome.as_deref(),
            &context_text,
        );
        let completion = self
            .gateway
            .complete_text(PromptTemplate::assessment_system(), &prompt, self.options())
            .await?;

        let class = input.department.class();
        let parsed = parse_assessment(&completion.content, class)?;

        let weights = self.weights.weights_for(&input.department);
        let computed = WeightTable::weighted_score(&parsed.dimensions, &weights);
        let overall = clamp_score(reconcile_overall(
            computed,
            parsed.reported_overall,
            SCORE_DRIFT_TOLERANCE,
        ));

        let policy_decision =
            self.policy
                .decide(input.level, overall, parsed.dimensions.consistency);
        let decision = reconcile_decision(policy_decision, parsed.proposed_decision);

        let assessment = QualityAssessment {
            department: input.department,
            level: input.level,
            dimensions: parsed.dimensions,
            overall,
            decision,
            confidence: parsed.certainty,
            issues: parsed.issues,
            suggestions: parsed.suggestions,
            reasoning: parsed.reasoning,
            fingerprint,
            assessed_at: current_timestamp(),
        };

        self.cache_store(&cache_key, &assessment).await;
        Ok(assessment)
    }

    /// Fast single-score pre-filter
    ///
    /// Returns an overall score in [0, 100] without dimensions, issues, or
    /// caching. Used to cheaply discard hopeless content before a full
    /// assessment.
    pub async fn quick_check(
        &self,
        content: &str,
        department: &Department,
    ) -> Result<f64, AssessQualityError> {
        #[derive(Deserialize)]
        struct QuickScore {
            score: f64,
        }

        let prompt = PromptTemplate::quick_check_prompt(content, department);
        let completion = self
            .gateway
            .complete_text(PromptTemplate::quick_check_system(), &prompt, self.options())
            .await?;

        let parsed: QuickScore = parse_json_object(&completion.content)?;
        Ok(clamp_score(parsed.score))
    }

    /// Consistency-only assessment against supplied prior facts
    pub async fn check_consistency(
        &self,
        content: &str,
        existing_context: &str,
        department: &Department,
    ) -> Result<ConsistencyCheck, AssessQualityError> {
        #[derive(Deserialize)]
        struct RawConsistency {
            consistency: f64,
            #[serde(default)]
            contradictions: Vec<String>,
        }

        let prompt = PromptTemplate::consistency_prompt(content, existing_context, department);
        let completion = self
            .gateway
            .complete_text(PromptTemplate::consistency_system(), &prompt, self.options())
            .await?;

        let parsed: RawConsistency = parse_json_object(&completion.content)?;
        Ok(ConsistencyCheck {
            score: clamp_score(parsed.consistency),
            contradictions: parsed.contradictions,
        })
    }

    fn options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.behavior.temperature,
            max_tokens: self.behavior.max_tokens,
        }
    }

    async fn cache_lookup(&self, key: &str) -> Option<QualityAssessment> {
        if !self.behavior.cache_enabled {
            return None;
        }
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(assessment) => Some(assessment),
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                // Cache trouble must never fail scoring.
                warn!("Assessment cache read failed: {}", e);
                None
            }
        }
    }

    async fn cache_store(&self, key: &str, assessment: &QualityAssessment) {
        if !self.behavior.cache_enabled {
            return;
        }
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        match serde_json::to_string(assessment) {
            Ok(json) => {
                if let Err(e) = cache.set(key, &json, self.behavior.cache_ttl_seconds).await {
                    warn!("Assessment cache write failed: {}", e);
                }
            }
            Err(e) => warn!("Assessment serialization failed: {}", e),
        }
    }
}

/// Parse a small JSON object out of a possibly fenced, possibly chatty reply
fn parse_json_object<T: serde::de::DeserializeOwned>(
    response: &str,
) -> Result<T, AssessQualityError> {
    let stripped = strip_code_fences(response);
    let start = stripped.find('{');
    let end = stripped.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &stripped[start..=end],
        _ => {
            return Err(AssessQualityError::ScoringFailed(
                "no JSON object in response".into(),
            ));
        }
    };
    serde_json::from_str(json)
        .map_err(|e| AssessQualityError::ScoringFailed(format!("invalid response JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::assessment_cache::CacheError;
    use async_trait::async_trait;
    use greenlight_domain::QualityDecision;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeGateway {
        response: String,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScoringGateway for FakeGateway {
        async fn chat_complete(
            &self,
            _messages: &[crate::ports::scoring_gateway::ChatMessage],
            _options: ChatOptions,
        ) -> Result<crate::ports::scoring_gateway::ChatCompletion, ScoringGatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(crate::ports::scoring_gateway::ChatCompletion {
                content: self.response.clone(),
                model: "fake".into(),
                prompt_tokens: 0,
                completion_tokens: 0,
                finish_reason: Some("stop".into()),
            })
        }
    }

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl AssessmentCache for MemoryCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, _ttl: u64) -> Result<(), CacheError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn clear_by_prefix(&self, prefix: &str) -> Result<(), CacheError> {
            self.entries
                .lock()
                .unwrap()
                .retain(|k, _| !k.starts_with(prefix));
            Ok(())
        }
    }

    struct FailingCache;

    #[async_trait]
    impl AssessmentCache for FailingCache {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::Unavailable("down".into()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: u64) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("down".into()))
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("down".into()))
        }

        async fn clear_by_prefix(&self, _prefix: &str) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("down".into()))
        }
    }

    const GOOD_RESPONSE: &str = r#"{"confidence": 85, "completeness": 80, "relevance": 85, "consistency": 88, "creativity": 90, "overall": 86, "certainty": 0.8, "decision": "accept", "issues": [], "suggestions": [], "reasoning": "strong draft"}"#;

    fn use_case(gateway: Arc<FakeGateway>) -> AssessQualityUseCase<FakeGateway> {
        AssessQualityUseCase::new(
            gateway,
            ThresholdPolicy::default(),
            ScoringBehavior::default(),
        )
    }

    #[tokio::test]
    async fn test_assessment_flow() {
        let gateway = Arc::new(FakeGateway::new(GOOD_RESPONSE));
        let use_case = use_case(Arc::clone(&gateway));

        let input = AssessQualityInput::new("A chase scene.", Department::Story);
        let assessment = use_case.execute(input).await.unwrap();

        // Computed weighted score for story weights is 86.05; the reported
        // 86 is within drift tolerance and wins.
        assert_eq!(assessment.overall, 86.0);
        assert_eq!(assessment.decision, QualityDecision::Accept);
        assert_eq!(assessment.confidence, 0.8);
        assert_eq!(assessment.department, Department::Story);
        assert!(!assessment.fingerprint.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_issues_one_upstream_call() {
        let gateway = Arc::new(FakeGateway::new(GOOD_RESPONSE));
        let use_case =
            use_case(Arc::clone(&gateway)).with_cache(Arc::new(MemoryCache::default()));

        let input = AssessQualityInput::new("A chase scene.", Department::Story);
        let first = use_case.execute(input.clone()).await.unwrap();
        let second = use_case.execute(input).await.unwrap();

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cache_failure_degrades_to_uncached() {
        let gateway = Arc::new(FakeGateway::new(GOOD_RESPONSE));
        let use_case = use_case(Arc::clone(&gateway)).with_cache(Arc::new(FailingCache));

        let input = AssessQualityInput::new("A chase scene.", Department::Story);
        let assessment = use_case.execute(input.clone()).await.unwrap();
        assert_eq!(assessment.decision, QualityDecision::Accept);

        // Second call scores again because nothing could be cached.
        use_case.execute(input).await.unwrap();
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_surfaces_error() {
        let gateway = Arc::new(FakeGateway::new("I will not produce JSON."));
        let use_case = use_case(gateway);

        let input = AssessQualityInput::new("content", Department::Story);
        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(AssessQualityError::ScoringFailed(_))));
    }

    #[tokio::test]
    async fn test_miscalibrated_label_overridden() {
        // Dimensions put this deep in reject territory, label says exemplary.
        let response = r#"{"confidence": 30, "completeness": 30, "relevance": 30, "consistency": 30, "creativity": 30, "decision": "exemplary"}"#;
        let gateway = Arc::new(FakeGateway::new(response));
        let use_case = use_case(gateway);

        let input = AssessQualityInput::new("content", Department::Story);
        let assessment = use_case.execute(input).await.unwrap();
        assert_eq!(assessment.decision, QualityDecision::Reject);
    }

    #[tokio::test]
    async fn test_quick_check_clamps_score() {
        let gateway = Arc::new(FakeGateway::new(r#"{"score": 180}"#));
        let use_case = use_case(gateway);

        let score = use_case.quick_check("content", &Department::Visual).await.unwrap();
        assert_eq!(score, 100.0);
    }

    #[tokio::test]
    async fn test_check_consistency_returns_contradictions() {
        let response =
            r#"{"consistency": 40, "contradictions": ["Mira cannot be in two places"]}"#;
        let gateway = Arc::new(FakeGateway::new(response));
        let use_case = use_case(gateway);

        let check = use_case
            .check_consistency("new content", "established facts", &Department::Story)
            .await
            .unwrap();
        assert_eq!(check.score, 40.0);
        assert_eq!(check.contradictions.len(), 1);
    }
}
