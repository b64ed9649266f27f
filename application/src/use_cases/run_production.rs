//! Run Production use case
//!
//! The full pipeline for one request: load project context, route
//! departments, build the execution plan, run it tier by tier, check
//! cross-department consistency against the Brain, and aggregate everything
//! into a single quality-gated result. Only routing and planning can fail
//! the pipeline; from execution onward every problem degrades the result
//! instead of aborting it.

use crate::config::EngineConfig;
use crate::ports::brain::BrainPort;
use crate::ports::context_store::ContextStore;
use crate::ports::progress::{NoProgress, ProductionPhase, ProgressNotifier};
use crate::ports::relevance_scorer::RelevanceScorer;
use crate::use_cases::execute_plan::{DepartmentExecutor, ExecutePlanUseCase};
use crate::use_cases::route_departments::RouteDepartmentsUseCase;
use greenlight_domain::{
    aggregate, clamp_unit, Department, DepartmentReport, DomainError, ExecutionPlan,
    OrchestratorResult, ProductionRequest, RoutingDecision,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can abort a production run before execution starts
#[derive(Error, Debug)]
pub enum ProductionError {
    #[error("Routing failed: {0}")]
    RoutingFailed(DomainError),

    #[error("Planning failed: {0}")]
    PlanningFailed(DomainError),
}

/// Use case orchestrating a complete production run
pub struct RunProductionUseCase {
    router: RouteDepartmentsUseCase,
    executor: Arc<dyn DepartmentExecutor>,
    context_store: Option<Arc<dyn ContextStore>>,
    brain: Option<Arc<dyn BrainPort>>,
    progress: Arc<dyn ProgressNotifier>,
    declarations: HashMap<Department, Vec<Department>>,
    config: EngineConfig,
}

impl RunProductionUseCase {
    pub fn new(
        scorer: Arc<dyn RelevanceScorer>,
        executor: Arc<dyn DepartmentExecutor>,
        config: EngineConfig,
    ) -> Self {
        Self {
            router: RouteDepartmentsUseCase::new(scorer).with_floor(config.relevance_floor),
            executor,
            context_store: None,
            brain: None,
            progress: Arc::new(NoProgress),
            declarations: HashMap::new(),
            config,
        }
    }

    pub fn with_context_store(mut self, store: Arc<dyn ContextStore>) -> Self {
        self.context_store = Some(store);
        self
    }

    pub fn with_brain(mut self, brain: Arc<dyn BrainPort>) -> Self {
        self.brain = Some(brain);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Override the default department dependency declarations
    pub fn with_declarations(
        mut self,
        declarations: HashMap<Department, Vec<Department>>,
    ) -> Self {
        self.declarations = declarations;
        self
    }

    /// Run the full pipeline for one request
    pub async fn execute(
        &self,
        mut request: ProductionRequest,
    ) -> Result<OrchestratorResult, ProductionError> {
        self.load_context(&mut request).await;

        self.progress.on_phase_start(ProductionPhase::Routing, 1);
        let routing = self
            .router
            .execute(&request)
            .map_err(ProductionError::RoutingFailed)?;
        self.progress.on_phase_complete(ProductionPhase::Routing);

        self.progress.on_phase_start(ProductionPhase::Planning, 1);
        let plan = ExecutionPlan::build(&routing, &self.declarations)
            .map_err(ProductionError::PlanningFailed)?;
        info!(
            "Planned {} department(s) across {} tier(s)",
            plan.department_count(),
            plan.tiers.len()
        );
        self.progress.on_phase_complete(ProductionPhase::Planning);

        self.progress
            .on_phase_start(ProductionPhase::Execution, plan.department_count());
        let runner = ExecutePlanUseCase::new(Arc::clone(&self.executor))
            .with_progress(Arc::clone(&self.progress));
        let mut reports = runner.execute(&request, &routing, &plan).await;
        self.progress.on_phase_complete(ProductionPhase::Execution);

        let external_consistency = self.check_consistency(&request, &routing, &reports).await;

        self.progress.on_phase_start(ProductionPhase::Aggregation, 1);
        for relevance in &routing.not_relevant {
            reports.push(DepartmentReport::not_relevant(relevance.department.clone()));
        }
        let result = aggregate(
            &routing,
            reports,
            external_consistency,
            &self.config.thresholds,
        );
        self.progress.on_phase_complete(ProductionPhase::Aggregation);

        info!(
            "Production for {} finished: quality {:.2}, consistency {:.2}, recommendation {}",
            request.project_id, result.overall_quality, result.consistency, result.recommendation
        );
        Ok(result)
    }

    /// Fill in project context when the request carries none
    ///
    /// Context trouble is not fatal; scoring just runs with less grounding.
    async fn load_context(&self, request: &mut ProductionRequest) {
        if request.context.is_some() {
            return;
        }
        let Some(store) = self.context_store.as_ref() else {
            return;
        };
        match store.load_context(&request.project_id).await {
            Ok(context) => request.context = Some(context),
            Err(e) => warn!("Context load for {} failed: {}", request.project_id, e),
        }
    }

    /// Cross-department consistency from the Brain, if it answers
    ///
    /// Returns none when the Brain is absent, there is no accepted content
    /// to check, or the call fails; aggregation then falls back to the
    /// department-level consistency dimensions.
    async fn check_consistency(
        &self,
        request: &ProductionRequest,
        routing: &RoutingDecision,
        reports: &[DepartmentReport],
    ) -> Option<f64> {
        let brain = self.brain.as_ref()?;

        let combined = reports
            .iter()
            .filter(|r| r.is_complete())
            .map(|r| r.accepted_content())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if combined.is_empty() {
            return None;
        }

        match brain
            .validate_content(&combined, &routing.primary.department, &request.project_id)
            .await
        {
            Ok(validation) => {
                if !validation.contradictions.is_empty() {
                    info!(
                        "Brain flagged {} contradiction(s) for {}",
                        validation.contradictions.len(),
                        request.project_id
                    );
                }
                Some(clamp_unit(validation.coherence_score))
            }
            Err(e) => {
                warn!("Brain consistency check failed, using local fallback: {}", e);
                None
            }
        }
    }
}
