//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Structural errors are fatal before execution starts; everything that can
/// go wrong mid-flight is captured in department reports instead.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Dependency cycle among departments: {0:?}")]
    DependencyCycle(Vec<String>),

    #[error("Department {department} depends on unknown department {dependency}")]
    UnknownDependency {
        department: String,
        dependency: String,
    },

    #[error("No departments selected for execution")]
    NoDepartments,

    #[error("Scoring weights for {0} do not sum to 1.0")]
    InvalidWeights(String),

    #[error("Malformed assessment response: {0}")]
    MalformedAssessment(String),
}

impl DomainError {
    /// Check if this error is a structural planning failure
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DomainError::DependencyCycle(_)
                | DomainError::UnknownDependency { .. }
                | DomainError::NoDepartments
        )
    }
}
