//! REST client for the project document store

use async_trait::async_trait;
use greenlight_application::{ContextStore, ContextStoreError};
use greenlight_domain::{ContextEntity, ProjectContext};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Context store adapter backed by the document service's REST API
pub struct RestContextStore {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct ProjectPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    synopsis: Option<String>,
    #[serde(default)]
    entities: Vec<EntityPayload>,
}

#[derive(Deserialize)]
struct EntityPayload {
    #[serde(default = "default_kind")]
    kind: String,
    name: String,
    #[serde(default)]
    summary: Option<String>,
}

fn default_kind() -> String {
    "document".to_string()
}

impl RestContextStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl ProjectPayload {
    fn into_context(self, project_id: &str) -> ProjectContext {
        ProjectContext {
            project_id: project_id.to_string(),
            title: self.title,
            genre: self.genre,
            synopsis: self.synopsis,
            entities: self
                .entities
                .into_iter()
                .map(|e| ContextEntity {
                    kind: e.kind,
                    name: e.name,
                    summary: e.summary,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl ContextStore for RestContextStore {
    async fn load_context(&self, project_id: &str) -> Result<ProjectContext, ContextStoreError> {
        debug!("Loading context for project {}", project_id);
        let response = self
            .client
            .get(self.endpoint(&format!("api/projects/{}", project_id)))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ContextStoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ContextStoreError::NotFound(project_id.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ContextStoreError::RequestFailed(format!(
                "{}: {}",
                status.as_u16(),
                text
            )));
        }

        let payload: ProjectPayload = response
            .json()
            .await
            .map_err(|e| ContextStoreError::RequestFailed(format!("invalid response body: {}", e)))?;

        Ok(payload.into_context(project_id))
    }
}
