//! Domain layer for greenlight
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quality gating
//!
//! Every piece of produced content is graded on six dimensions, weighted per
//! department, and mapped to a four-way decision (reject / retry / accept /
//! exemplary) by a level-aware threshold policy. Decisions cascade upward:
//! specialist outputs roll into department reports, department reports roll
//! into one orchestrator result with a final three-way recommendation
//! (ingest / modify / discard).
//!
//! ## Departments
//!
//! Production work is organized into departments (story, character, visual,
//! ...). A router classifies each department as primary, supporting, or not
//! relevant per request; declared dependencies between departments shape a
//! tiered execution plan.

pub mod context;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod routing;
pub mod scoring;

// Re-export commonly used types
pub use context::{ContextEntity, ProjectContext};
pub use core::{
    department::{Department, DepartmentClass},
    error::DomainError,
    request::ProductionRequest,
};
pub use orchestration::{
    node::{DepartmentNode, ExecutionState},
    plan::ExecutionPlan,
    report::{DepartmentReport, ReportStatus},
    result::{aggregate, OrchestratorResult, Recommendation},
    specialist::{department_quality, SpecialistGrading, SpecialistOutput, SpecialistVerdict},
};
pub use prompt::assessment::PromptTemplate;
pub use routing::relevance::{
    classify_departments, DepartmentRelevance, RoutingDecision, RoutingRole, RELEVANCE_FLOOR,
};
pub use scoring::{
    assessment::{current_timestamp, QualityAssessment},
    decision::QualityDecision,
    dimensions::{clamp_score, clamp_unit, QualityDimensions},
    parsing::{parse_assessment, ParsedAssessment},
    reconcile::{reconcile_decision, reconcile_overall},
    thresholds::{AssessmentLevel, ThresholdBand, ThresholdPolicy},
    weights::{ScoringWeights, WeightTable},
};
