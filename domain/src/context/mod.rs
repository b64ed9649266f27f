//! Project context — established facts used when grading new content
//!
//! Context is read-only input to the engine. It is fetched from the
//! document store by the embedding application, serialized into scoring
//! prompts, and hashed into the assessment fingerprint.

use serde::{Deserialize, Serialize};

/// Established facts about a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    /// Related entities (characters, scenes, locations)
    #[serde(default)]
    pub entities: Vec<ContextEntity>,
}

/// A single related entity from the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntity {
    /// Collection the entity came from (character, scene, location, ...)
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ProjectContext {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn with_entity(
        mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        summary: Option<String>,
    ) -> Self {
        self.entities.push(ContextEntity {
            kind: kind.into(),
            name: name.into(),
            summary,
        });
        self
    }

    /// Render the context as plain text for inclusion in a scoring prompt
    pub fn as_prompt_text(&self) -> String {
        let mut text = String::new();

        if let Some(title) = &self.title {
            text.push_str(&format!("Project: {}\n", title));
        }
        if let Some(genre) = &self.genre {
            text.push_str(&format!("Genre: {}\n", genre));
        }
        if let Some(synopsis) = &self.synopsis {
            text.push_str(&format!("Synopsis: {}\n", synopsis));
        }

        if !self.entities.is_empty() {
            text.push_str("Established entities:\n");
            for entity in &self.entities {
                match &entity.summary {
                    Some(summary) => {
                        text.push_str(&format!("- [{}] {}: {}\n", entity.kind, entity.name, summary))
                    }
                    None => text.push_str(&format!("- [{}] {}\n", entity.kind, entity.name)),
                }
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_includes_entities() {
        let context = ProjectContext::new("proj-1")
            .with_entity("character", "Mira", Some("A street thief with a silver tongue".into()))
            .with_entity("location", "The Bazaar", None);

        let text = context.as_prompt_text();
        assert!(text.contains("[character] Mira"));
        assert!(text.contains("street thief"));
        assert!(text.contains("[location] The Bazaar"));
    }

    #[test]
    fn test_empty_context_renders_empty() {
        let context = ProjectContext::new("proj-1");
        assert!(context.as_prompt_text().is_empty());
    }
}
