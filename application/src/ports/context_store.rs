//! Document/context store port
//!
//! Read-only access to project metadata and related entities used to build
//! scoring prompts. Lookups are by identifier, depth-limited; no recursive
//! relationship expansion.

use async_trait::async_trait;
use greenlight_domain::ProjectContext;
use thiserror::Error;

/// Errors that can occur reading the context store
#[derive(Error, Debug)]
pub enum ContextStoreError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Read-only project context source
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Load project metadata and related entities for scoring context
    async fn load_context(&self, project_id: &str) -> Result<ProjectContext, ContextStoreError>;
}
