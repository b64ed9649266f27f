//! Execute Plan use case
//!
//! Runs an execution plan tier by tier. Departments within a tier run
//! concurrently on separate tasks; the tier boundary is a join barrier, so
//! a department never starts before every dependency has finished. Failures
//! stay inside their department report and dependents of a failed
//! department are skipped, never run against missing upstream output.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use async_trait::async_trait;
use greenlight_domain::{Department, DepartmentReport, ExecutionPlan, ProductionRequest, RoutingDecision};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Executes the work of a single department
///
/// Implementations must not fail the call: anything that goes wrong inside
/// the department is reported through the returned report's status and
/// issues.
#[async_trait]
pub trait DepartmentExecutor: Send + Sync {
    async fn execute_department(
        &self,
        department: &Department,
        relevance: f64,
        request: &ProductionRequest,
        upstream: &[DepartmentReport],
    ) -> DepartmentReport;
}

/// Use case for running all selected departments in dependency order
pub struct ExecutePlanUseCase {
    executor: Arc<dyn DepartmentExecutor>,
    progress: Arc<dyn ProgressNotifier>,
}

impl ExecutePlanUseCase {
    pub fn new(executor: Arc<dyn DepartmentExecutor>) -> Self {
        Self {
            executor,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Run every planned department, one report each, in plan order
    ///
    /// The returned list covers exactly the planned departments: complete
    /// where the work succeeded, pending where the department failed, and
    /// skipped where a dependency did not complete.
    pub async fn execute(
        &self,
        request: &ProductionRequest,
        routing: &RoutingDecision,
        plan: &ExecutionPlan,
    ) -> Vec<DepartmentReport> {
        let request = Arc::new(request.clone());
        let mut finished: HashMap<Department, DepartmentReport> = HashMap::new();

        for (tier_index, tier) in plan.tiers.iter().enumerate() {
            self.progress.on_tier_start(tier_index, tier.len());
            info!("Starting tier {} with {} department(s)", tier_index, tier.len());

            let mut tasks: JoinSet<DepartmentReport> = JoinSet::new();
            for department in tier {
                let relevance = routing.relevance_of(department);
                let dependencies = plan.dependencies_of(department);

                let blocked = dependencies
                    .iter()
                    .find(|dep| !finished.get(dep).map(|r| r.is_complete()).unwrap_or(false));
                if let Some(dependency) = blocked {
                    warn!(
                        "Skipping {}: dependency {} did not complete",
                        department, dependency
                    );
                    let report = DepartmentReport::skipped(department.clone(), relevance, dependency);
                    self.progress.on_department_complete(department, false);
                    finished.insert(department.clone(), report);
                    continue;
                }

                let upstream: Vec<DepartmentReport> = dependencies
                    .iter()
                    .filter_map(|dep| finished.get(dep).cloned())
                    .collect();
                let executor = Arc::clone(&self.executor);
                let request = Arc::clone(&request);
                let department = department.clone();
                tasks.spawn(async move {
                    executor
                        .execute_department(&department, relevance, &request, &upstream)
                        .await
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(report) => {
                        self.progress
                            .on_department_complete(&report.department, report.is_complete());
                        finished.insert(report.department.clone(), report);
                    }
                    Err(e) => warn!("Department task aborted: {}", e),
                }
            }

            // A panicked task leaves no report behind; give its department a
            // failed one so dependents skip instead of running blind.
            for department in tier {
                if !finished.contains_key(department) {
                    let relevance = routing.relevance_of(department);
                    finished.insert(
                        department.clone(),
                        DepartmentReport::failed(
                            department.clone(),
                            relevance,
                            "department task aborted",
                        ),
                    );
                }
            }
        }

        plan.tiers
            .iter()
            .flatten()
            .filter_map(|department| finished.remove(department))
            .collect()
    }
}
