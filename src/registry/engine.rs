//! Entity stores, sync coordination and bootstrap loading.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{RemoteError, RemoteStore};
use crate::cache::CacheManager;
use crate::models::{
    Assignment, AssignmentDraft, AssignmentPatch, ClassGroup, ClassGroupDraft, ClassGroupPatch,
    Project, ProjectDraft, ProjectPatch, SchoolProfile,
};

// ============================================================================
// Status and outcomes
// ============================================================================

/// Whether in-memory state currently matches the remote store.
///
/// `Error` is sticky: it stays visible until a later mutation happens to
/// succeed. There is no background retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error,
}

/// Result of a mutation: the value as applied in memory plus the status the
/// operation settled on. A mutation that reaches the optimistic apply always
/// succeeds from the caller's point of view, even when the remote write
/// failed - the status carries that distinction.
#[derive(Debug, Clone)]
pub struct MutationOutcome<T> {
    pub value: T,
    pub status: SyncStatus,
}

/// Errors that block a mutation outright. Remote failures are not here:
/// they are absorbed into `SyncStatus::Error`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The mutation referenced an entity that does not exist. No optimistic
    /// apply has happened when this is returned.
    #[error("referential violation: {0}")]
    ReferentialViolation(String),
}

// ============================================================================
// Registry
// ============================================================================

/// The school registry: one institution profile plus projects, their
/// class-groups and teacher assignments.
///
/// Single logical writer: mutations take `&mut self` and run to completion
/// before the next one starts. Referential checks and cascades scan the
/// collections linearly; the dataset is one school's projects, tens of rows.
pub struct SchoolRegistry<R: RemoteStore> {
    remote: R,
    cache: CacheManager,
    profile: Option<SchoolProfile>,
    projects: Vec<Project>,
    class_groups: Vec<ClassGroup>,
    assignments: Vec<Assignment>,
    status: SyncStatus,
}

impl<R: RemoteStore> SchoolRegistry<R> {
    pub fn new(remote: R, cache: CacheManager) -> Self {
        Self {
            remote,
            cache,
            profile: None,
            projects: Vec::new(),
            class_groups: Vec::new(),
            assignments: Vec::new(),
            status: SyncStatus::Synced,
        }
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    pub fn profile(&self) -> Option<&SchoolProfile> {
        self.profile.as_ref()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn class_groups(&self) -> &[ClassGroup] {
        &self.class_groups
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.status
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Hydrate the registry: every collection from the remote store, or -
    /// if any remote fetch fails - every collection from the local cache.
    /// Sources are never mixed; a cached profile next to a fresh project
    /// list could hold foreign keys pointing at remote-only ids.
    pub async fn load(&mut self) -> SyncStatus {
        self.status = SyncStatus::Syncing;

        match self.fetch_all_remote().await {
            Ok(()) => {
                info!(
                    projects = self.projects.len(),
                    class_groups = self.class_groups.len(),
                    assignments = self.assignments.len(),
                    "registry loaded from remote"
                );
                self.status = SyncStatus::Synced;
            }
            Err(e) => {
                warn!(error = %e, "remote unavailable, loading registry from cache");
                self.load_all_from_cache();
                self.status = SyncStatus::Error;
            }
        }

        self.status
    }

    /// Re-run the bootstrap on demand.
    pub async fn reload(&mut self) -> SyncStatus {
        self.load().await
    }

    async fn fetch_all_remote(&mut self) -> Result<(), RemoteError> {
        let profile = self.remote.fetch_profile().await?;
        let mut projects = self.remote.fetch_projects().await?;
        let class_groups = self.remote.fetch_class_groups().await?;
        let assignments = self.remote.fetch_assignments().await?;

        projects.sort_by(|a, b| a.name.cmp(&b.name));

        self.profile = profile;
        self.projects = projects;
        self.class_groups = class_groups;
        self.assignments = assignments;
        Ok(())
    }

    /// Load every collection from its cached snapshot. An absent or
    /// unreadable snapshot resets that collection to its empty default.
    fn load_all_from_cache(&mut self) {
        self.profile = match self.cache.load_profile() {
            Ok(Some(cached)) => Some(cached.data),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "unreadable profile snapshot, using default");
                None
            }
        };
        self.projects = match self.cache.load_projects() {
            Ok(Some(cached)) => cached.data,
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "unreadable projects snapshot, using default");
                Vec::new()
            }
        };
        self.class_groups = match self.cache.load_class_groups() {
            Ok(Some(cached)) => cached.data,
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "unreadable class-groups snapshot, using default");
                Vec::new()
            }
        };
        self.assignments = match self.cache.load_assignments() {
            Ok(Some(cached)) => cached.data,
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "unreadable assignments snapshot, using default");
                Vec::new()
            }
        };
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Save the institution profile: insert on first save, update once an id
    /// has been assigned. Repeated saves before an id exists keep updating
    /// the same single instance; the profile is never duplicated.
    pub async fn save_profile(&mut self, mut profile: SchoolProfile) -> MutationOutcome<SchoolProfile> {
        self.status = SyncStatus::Syncing;

        let result = match profile.id.clone() {
            Some(id) => self.remote.update_profile(&id, &profile).await,
            None => match self.remote.insert_profile(&profile).await {
                Ok(id) => {
                    profile.id = Some(id);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        };

        let status = self.settle("save_profile", result);
        self.profile = Some(profile.clone());
        self.persist_profile();

        MutationOutcome { value: profile, status }
    }

    /// Force-overwrite the profile from an externally supplied snapshot
    /// (backup restore). This is a local recovery action: memory and cache
    /// only, no remote write, sync status untouched.
    pub fn restore_profile(&mut self, profile: SchoolProfile) {
        info!("restoring profile from external snapshot");
        self.profile = Some(profile);
        self.persist_profile();
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Add a project. Never fails: when the remote insert does not go
    /// through, the project is kept with a locally generated id and
    /// `pending_sync` set, and the status settles on `Error`.
    pub async fn add_project(&mut self, draft: ProjectDraft) -> MutationOutcome<Project> {
        self.status = SyncStatus::Syncing;

        let project = match self.remote.insert_project(&draft).await {
            Ok(id) => {
                self.status = SyncStatus::Synced;
                draft.into_project(id, false)
            }
            Err(e) => {
                warn!(error = %e, "remote insert failed, keeping project locally");
                self.status = SyncStatus::Error;
                draft.into_project(local_id(), true)
            }
        };

        self.projects.push(project.clone());
        self.projects.sort_by(|a, b| a.name.cmp(&b.name));
        self.persist_projects();

        MutationOutcome {
            value: project,
            status: self.status,
        }
    }

    pub async fn update_project(
        &mut self,
        id: &str,
        patch: ProjectPatch,
    ) -> Result<MutationOutcome<Project>, RegistryError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| {
                RegistryError::ReferentialViolation(format!("project {} does not exist", id))
            })?;

        patch.apply(project);
        let updated = project.clone();
        self.projects.sort_by(|a, b| a.name.cmp(&b.name));

        self.status = SyncStatus::Syncing;
        let result = self.remote.update_project(id, &updated).await;
        let status = self.settle("update_project", result);
        self.persist_projects();

        Ok(MutationOutcome { value: updated, status })
    }

    /// Delete a project and cascade to its class-groups and to every
    /// assignment referencing the project or a removed class-group. The
    /// cascade is applied to all collections before the remote call is
    /// issued, so no reader observes a half-removed hierarchy.
    pub async fn remove_project(&mut self, id: &str) -> Result<SyncStatus, RegistryError> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "project {} does not exist",
                id
            )));
        }

        self.projects.retain(|p| p.id != id);
        let removed_groups: Vec<String> = self
            .class_groups
            .iter()
            .filter(|g| g.project_id == id)
            .map(|g| g.id.clone())
            .collect();
        self.class_groups.retain(|g| g.project_id != id);
        self.assignments
            .retain(|a| a.project_id != id && !removed_groups.contains(&a.class_group_id));

        debug!(
            project = id,
            class_groups = removed_groups.len(),
            "cascading project delete"
        );

        self.status = SyncStatus::Syncing;
        let result = self.remote.delete_project(id).await;
        let status = self.settle("remove_project", result);
        self.persist_projects();
        self.persist_class_groups();
        self.persist_assignments();

        Ok(status)
    }

    // =========================================================================
    // Class-groups
    // =========================================================================

    /// Add a class-group under an existing project. Fails with
    /// `ReferentialViolation` before anything is applied when the project
    /// does not exist.
    pub async fn add_class_group(
        &mut self,
        draft: ClassGroupDraft,
    ) -> Result<MutationOutcome<ClassGroup>, RegistryError> {
        if !self.projects.iter().any(|p| p.id == draft.project_id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "project {} does not exist",
                draft.project_id
            )));
        }

        self.status = SyncStatus::Syncing;

        let group = match self.remote.insert_class_group(&draft).await {
            Ok(id) => {
                self.status = SyncStatus::Synced;
                draft.into_class_group(id, false)
            }
            Err(e) => {
                warn!(error = %e, "remote insert failed, keeping class-group locally");
                self.status = SyncStatus::Error;
                draft.into_class_group(local_id(), true)
            }
        };

        self.class_groups.push(group.clone());
        self.persist_class_groups();

        Ok(MutationOutcome {
            value: group,
            status: self.status,
        })
    }

    pub async fn update_class_group(
        &mut self,
        id: &str,
        patch: ClassGroupPatch,
    ) -> Result<MutationOutcome<ClassGroup>, RegistryError> {
        let group = self
            .class_groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| {
                RegistryError::ReferentialViolation(format!("class-group {} does not exist", id))
            })?;

        patch.apply(group);
        let updated = group.clone();

        self.status = SyncStatus::Syncing;
        let result = self.remote.update_class_group(id, &updated).await;
        let status = self.settle("update_class_group", result);
        self.persist_class_groups();

        Ok(MutationOutcome { value: updated, status })
    }

    /// Delete a class-group and cascade to its assignments.
    pub async fn remove_class_group(&mut self, id: &str) -> Result<SyncStatus, RegistryError> {
        if !self.class_groups.iter().any(|g| g.id == id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "class-group {} does not exist",
                id
            )));
        }

        self.class_groups.retain(|g| g.id != id);
        self.assignments.retain(|a| a.class_group_id != id);

        self.status = SyncStatus::Syncing;
        let result = self.remote.delete_class_group(id).await;
        let status = self.settle("remove_class_group", result);
        self.persist_class_groups();
        self.persist_assignments();

        Ok(status)
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Assign a teacher to a class-group. Both the project and the
    /// class-group must exist; otherwise the call fails before any apply.
    pub async fn add_assignment(
        &mut self,
        draft: AssignmentDraft,
    ) -> Result<MutationOutcome<Assignment>, RegistryError> {
        if !self.projects.iter().any(|p| p.id == draft.project_id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "project {} does not exist",
                draft.project_id
            )));
        }
        if !self.class_groups.iter().any(|g| g.id == draft.class_group_id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "class-group {} does not exist",
                draft.class_group_id
            )));
        }

        self.status = SyncStatus::Syncing;

        let assignment = match self.remote.insert_assignment(&draft).await {
            Ok(id) => {
                self.status = SyncStatus::Synced;
                draft.into_assignment(id, false)
            }
            Err(e) => {
                warn!(error = %e, "remote insert failed, keeping assignment locally");
                self.status = SyncStatus::Error;
                draft.into_assignment(local_id(), true)
            }
        };

        self.assignments.push(assignment.clone());
        self.persist_assignments();

        Ok(MutationOutcome {
            value: assignment,
            status: self.status,
        })
    }

    pub async fn update_assignment(
        &mut self,
        id: &str,
        patch: AssignmentPatch,
    ) -> Result<MutationOutcome<Assignment>, RegistryError> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| {
                RegistryError::ReferentialViolation(format!("assignment {} does not exist", id))
            })?;

        patch.apply(assignment);
        let updated = assignment.clone();

        self.status = SyncStatus::Syncing;
        let result = self.remote.update_assignment(id, &updated).await;
        let status = self.settle("update_assignment", result);
        self.persist_assignments();

        Ok(MutationOutcome { value: updated, status })
    }

    pub async fn remove_assignment(&mut self, id: &str) -> Result<SyncStatus, RegistryError> {
        if !self.assignments.iter().any(|a| a.id == id) {
            return Err(RegistryError::ReferentialViolation(format!(
                "assignment {} does not exist",
                id
            )));
        }

        self.assignments.retain(|a| a.id != id);

        self.status = SyncStatus::Syncing;
        let result = self.remote.delete_assignment(id).await;
        let status = self.settle("remove_assignment", result);
        self.persist_assignments();

        Ok(status)
    }

    // =========================================================================
    // Sync plumbing
    // =========================================================================

    /// Settle the status after a remote write. The optimistic in-memory
    /// change is kept on failure; the caller persists the snapshot either
    /// way, so the cache always matches memory, never the remote.
    fn settle(&mut self, op: &str, result: Result<(), RemoteError>) -> SyncStatus {
        match result {
            Ok(()) => self.status = SyncStatus::Synced,
            Err(e) => {
                warn!(op, error = %e, "remote write failed, keeping local change");
                self.status = SyncStatus::Error;
            }
        }
        self.status
    }

    // Cache writes are best-effort: a failed snapshot is logged and never
    // surfaced to the mutation's caller.

    fn persist_profile(&self) {
        if let Some(ref profile) = self.profile {
            if let Err(e) = self.cache.save_profile(profile) {
                warn!(error = %e, "failed to write profile snapshot");
            }
        }
    }

    fn persist_projects(&self) {
        if let Err(e) = self.cache.save_projects(&self.projects) {
            warn!(error = %e, "failed to write projects snapshot");
        }
    }

    fn persist_class_groups(&self) {
        if let Err(e) = self.cache.save_class_groups(&self.class_groups) {
            warn!(error = %e, "failed to write class-groups snapshot");
        }
    }

    fn persist_assignments(&self) {
        if let Err(e) = self.cache.save_assignments(&self.assignments) {
            warn!(error = %e, "failed to write assignments snapshot");
        }
    }
}

/// Locally scoped id for an entity created while the remote is unreachable.
/// Distinguishable from server-assigned ids and never reconciled with one;
/// the entity's `pending_sync` flag records the divergence.
fn local_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Tests
// ============================================================================
