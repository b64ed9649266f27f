//! Application layer for greenlight
//!
//! This crate contains the use cases that orchestrate domain logic and the
//! ports through which infrastructure is wired in. Use cases never talk to
//! concrete backends; they see gateways, caches, stores, and runners only
//! through the traits defined here.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EngineConfig, ScoringBehavior};
pub use ports::{
    assessment_cache::{AssessmentCache, CacheError},
    brain::{BrainError, BrainPort, BrainSearchHit, BrainValidation},
    context_store::{ContextStore, ContextStoreError},
    department_runner::{DepartmentRunError, DepartmentRunner},
    progress::{NoProgress, ProductionPhase, ProgressNotifier},
    relevance_scorer::RelevanceScorer,
    scoring_gateway::{
        ChatCompletion, ChatMessage, ChatOptions, ScoringGateway, ScoringGatewayError,
    },
};
pub use use_cases::{
    assess_quality::{
        AssessQualityError, AssessQualityInput, AssessQualityUseCase, ConsistencyCheck,
    },
    execute_plan::{DepartmentExecutor, ExecutePlanUseCase},
    route_departments::RouteDepartmentsUseCase,
    run_department::RunDepartmentUseCase,
    run_production::{ProductionError, RunProductionUseCase},
};
