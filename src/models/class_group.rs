//! Class-group model.
//!
//! A class-group always belongs to exactly one project via `project_id`.
//! The engine validates that reference on creation and cascades removal
//! when the owning project is deleted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: String,
    #[serde(default)]
    pub pending_sync: bool,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
}

/// Creation payload for a class-group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassGroupDraft {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
}

impl ClassGroupDraft {
    pub fn into_class_group(self, id: String, pending_sync: bool) -> ClassGroup {
        ClassGroup {
            id,
            pending_sync,
            project_id: self.project_id,
            name: self.name,
            description: self.description,
            capacity: self.capacity,
        }
    }
}

/// Settable fields for a partial class-group update. The owning project is
/// not settable; re-parenting a group is not a supported operation.
#[derive(Debug, Clone, Default)]
pub struct ClassGroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
}

impl ClassGroupPatch {
    pub fn apply(&self, group: &mut ClassGroup) {
        if let Some(ref name) = self.name {
            group.name = name.clone();
        }
        if let Some(ref description) = self.description {
            group.description = description.clone();
        }
        if let Some(capacity) = self.capacity {
            group.capacity = capacity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_owning_project() {
        let mut group = ClassGroupDraft {
            project_id: "P1".to_string(),
            name: "Group A".to_string(),
            description: String::new(),
            capacity: 20,
        }
        .into_class_group("C1".to_string(), false);

        let patch = ClassGroupPatch {
            capacity: Some(25),
            ..Default::default()
        };
        patch.apply(&mut group);

        assert_eq!(group.capacity, 25);
        assert_eq!(group.project_id, "P1");
        assert_eq!(group.id, "C1");
    }
}
