//! Production request value object

use super::department::Department;
use crate::context::ProjectContext;
use serde::{Deserialize, Serialize};

/// An incoming production request
///
/// The brief is free text from the caller; hints optionally force specific
/// departments to full relevance regardless of the routing heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// Identifier of the project this request belongs to
    pub project_id: String,
    /// What the caller wants produced
    pub brief: String,
    /// Departments explicitly requested by the caller
    #[serde(default)]
    pub hints: Vec<Department>,
    /// Established project facts used for scoring context
    #[serde(default)]
    pub context: Option<ProjectContext>,
}

impl ProductionRequest {
    pub fn new(project_id: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            brief: brief.into(),
            hints: Vec::new(),
            context: None,
        }
    }

    /// Force a department to full relevance
    pub fn with_hint(mut self, department: Department) -> Self {
        self.hints.push(department);
        self
    }

    /// Attach established project facts
    pub fn with_context(mut self, context: ProjectContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Check if a department was explicitly requested
    pub fn is_hinted(&self, department: &Department) -> bool {
        self.hints.contains(department)
    }
}
