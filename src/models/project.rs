//! School project model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Pedagogical,
    Cultural,
    Sports,
    Other,
}

impl Default for ProjectCategory {
    fn default() -> Self {
        ProjectCategory::Pedagogical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOrigin {
    Own,
    External,
}

impl Default for ProjectOrigin {
    fn default() -> Self {
        ProjectOrigin::Own
    }
}

/// A school project. `pending_sync` marks an entity whose id was generated
/// locally because the remote insert failed; the id is never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub pending_sync: bool,
    pub name: String,
    pub description: String,
    pub category: ProjectCategory,
    pub origin: ProjectOrigin,
    pub active: bool,
}

/// Creation payload for a project; the id is assigned by the remote store
/// or generated locally on remote failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub category: ProjectCategory,
    pub origin: ProjectOrigin,
    pub active: bool,
}

impl ProjectDraft {
    pub fn into_project(self, id: String, pending_sync: bool) -> Project {
        Project {
            id,
            pending_sync,
            name: self.name,
            description: self.description,
            category: self.category,
            origin: self.origin,
            active: self.active,
        }
    }
}

/// Settable fields for a partial project update.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub origin: Option<ProjectOrigin>,
    pub active: Option<bool>,
}

impl ProjectPatch {
    pub fn apply(&self, project: &mut Project) {
        if let Some(ref name) = self.name {
            project.name = name.clone();
        }
        if let Some(ref description) = self.description {
            project.description = description.clone();
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(origin) = self.origin {
            project.origin = origin;
        }
        if let Some(active) = self.active {
            project.active = active;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> Project {
        Project {
            id: "P1".to_string(),
            pending_sync: false,
            name: "Chess club".to_string(),
            description: "Weekly chess lessons".to_string(),
            category: ProjectCategory::Pedagogical,
            origin: ProjectOrigin::Own,
            active: true,
        }
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut project = sample_project();
        let patch = ProjectPatch {
            active: Some(false),
            ..Default::default()
        };
        patch.apply(&mut project);

        assert!(!project.active);
        assert_eq!(project.name, "Chess club");
        assert_eq!(project.category, ProjectCategory::Pedagogical);
    }

    #[test]
    fn test_patch_never_touches_id() {
        let mut project = sample_project();
        let patch = ProjectPatch {
            name: Some("Chess and checkers".to_string()),
            category: Some(ProjectCategory::Cultural),
            ..Default::default()
        };
        patch.apply(&mut project);

        assert_eq!(project.id, "P1");
        assert_eq!(project.name, "Chess and checkers");
        assert_eq!(project.category, ProjectCategory::Cultural);
    }

    #[test]
    fn test_pending_sync_defaults_to_false_in_snapshots() {
        // Snapshots written before the flag existed must still load.
        let json = r#"{"id":"P9","name":"Garden","description":"","category":"other","origin":"external","active":true}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(!project.pending_sync);
        assert_eq!(project.origin, ProjectOrigin::External);
    }
}
