//! Execution state of one department within a production

use crate::core::department::Department;
use crate::routing::relevance::DepartmentRelevance;
use serde::{Deserialize, Serialize};

/// Lifecycle of a department task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Pending,
    Running,
    Complete,
    Failed,
    Skipped,
}

/// One department in the execution graph
///
/// Nodes are created per request from the routing decision and discarded
/// when the request completes. Dependencies listed here are already pruned
/// to selected departments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub department: Department,
    /// Relevance in [0, 1] from routing
    pub relevance: f64,
    pub dependencies: Vec<Department>,
    pub state: ExecutionState,
}

impl DepartmentNode {
    pub fn new(relevance: &DepartmentRelevance, dependencies: Vec<Department>) -> Self {
        Self {
            department: relevance.department.clone(),
            relevance: relevance.score,
            dependencies,
            state: ExecutionState::Pending,
        }
    }
}
