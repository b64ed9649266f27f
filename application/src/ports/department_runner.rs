//! Department runner port
//!
//! Produces the specialist outputs for one department. The runner is where
//! generation backends plug in; the engine only grades and gates whatever
//! comes back.

use async_trait::async_trait;
use greenlight_domain::{Department, DepartmentReport, ProductionRequest, SpecialistOutput};
use thiserror::Error;

/// Errors that can occur while running a department's specialists
#[derive(Error, Debug)]
pub enum DepartmentRunError {
    #[error("Department {0} has no specialists configured")]
    NoSpecialists(String),

    #[error("Specialist {specialist} failed: {reason}")]
    SpecialistFailed { specialist: String, reason: String },

    #[error("Runner error: {0}")]
    Other(String),
}

/// Produces specialist outputs for a department
///
/// `upstream` carries the completed reports of the department's
/// dependencies, in plan order, so later departments can build on earlier
/// output.
#[async_trait]
pub trait DepartmentRunner: Send + Sync {
    async fn run(
        &self,
        department: &Department,
        request: &ProductionRequest,
        upstream: &[DepartmentReport],
    ) -> Result<Vec<SpecialistOutput>, DepartmentRunError>;
}
