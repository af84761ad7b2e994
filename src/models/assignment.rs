//! Teacher assignment model.
//!
//! An assignment references exactly one project and one class-group. Both
//! references are validated on creation and removal cascades from either
//! parent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    #[serde(default)]
    pub pending_sync: bool,
    pub project_id: String,
    pub class_group_id: String,
    pub teacher_name: String,
    pub lessons: u32,
}

/// Creation payload for an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub project_id: String,
    pub class_group_id: String,
    pub teacher_name: String,
    pub lessons: u32,
}

impl AssignmentDraft {
    pub fn into_assignment(self, id: String, pending_sync: bool) -> Assignment {
        Assignment {
            id,
            pending_sync,
            project_id: self.project_id,
            class_group_id: self.class_group_id,
            teacher_name: self.teacher_name,
            lessons: self.lessons,
        }
    }
}

/// Settable fields for a partial assignment update. The project and
/// class-group references are fixed for the assignment's lifetime.
#[derive(Debug, Clone, Default)]
pub struct AssignmentPatch {
    pub teacher_name: Option<String>,
    pub lessons: Option<u32>,
}

impl AssignmentPatch {
    pub fn apply(&self, assignment: &mut Assignment) {
        if let Some(ref teacher_name) = self.teacher_name {
            assignment.teacher_name = teacher_name.clone();
        }
        if let Some(lessons) = self.lessons {
            assignment.lessons = lessons;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_references() {
        let mut assignment = AssignmentDraft {
            project_id: "P1".to_string(),
            class_group_id: "C1".to_string(),
            teacher_name: "Jane".to_string(),
            lessons: 4,
        }
        .into_assignment("A1".to_string(), false);

        let patch = AssignmentPatch {
            lessons: Some(6),
            ..Default::default()
        };
        patch.apply(&mut assignment);

        assert_eq!(assignment.lessons, 6);
        assert_eq!(assignment.project_id, "P1");
        assert_eq!(assignment.class_group_id, "C1");
    }
}
