use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::{Assignment, ClassGroup, Project, SchoolProfile};

/// A cached snapshot with the time it was written. The cache holds exactly
/// the most recent successfully-applied local state; there is no expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.snapshot_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    // ===== Profile =====

    pub fn load_profile(&self) -> Result<Option<CachedData<SchoolProfile>>> {
        self.load("profile")
    }

    pub fn save_profile(&self, profile: &SchoolProfile) -> Result<()> {
        self.save("profile", profile)
    }

    // ===== Projects =====

    pub fn load_projects(&self) -> Result<Option<CachedData<Vec<Project>>>> {
        self.load("projects")
    }

    pub fn save_projects(&self, projects: &[Project]) -> Result<()> {
        self.save("projects", &projects)
    }

    // ===== Class-groups =====

    pub fn load_class_groups(&self) -> Result<Option<CachedData<Vec<ClassGroup>>>> {
        self.load("class_groups")
    }

    pub fn save_class_groups(&self, groups: &[ClassGroup]) -> Result<()> {
        self.save("class_groups", &groups)
    }

    // ===== Assignments =====

    pub fn load_assignments(&self) -> Result<Option<CachedData<Vec<Assignment>>>> {
        self.load("assignments")
    }

    pub fn save_assignments(&self, assignments: &[Assignment]) -> Result<()> {
        self.save("assignments", &assignments)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectCategory, ProjectOrigin};

    fn manager() -> (CacheManager, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let manager = CacheManager::new(dir.path().to_path_buf()).unwrap();
        (manager, dir)
    }

    fn sample_projects() -> Vec<Project> {
        vec![Project {
            id: "P1".to_string(),
            pending_sync: false,
            name: "Reading circle".to_string(),
            description: String::new(),
            category: ProjectCategory::Pedagogical,
            origin: ProjectOrigin::Own,
            active: true,
        }]
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (manager, _dir) = manager();
        manager.save_projects(&sample_projects()).unwrap();

        let cached = manager.load_projects().unwrap().unwrap();
        assert_eq!(cached.data.len(), 1);
        assert_eq!(cached.data[0].id, "P1");
        assert_eq!(cached.data[0].name, "Reading circle");
    }

    #[test]
    fn test_missing_snapshot_is_absent() {
        let (manager, _dir) = manager();
        assert!(manager.load_assignments().unwrap().is_none());
    }

    #[test]
    fn test_save_is_a_full_replace() {
        let (manager, _dir) = manager();
        manager.save_projects(&sample_projects()).unwrap();
        manager.save_projects(&[]).unwrap();

        let cached = manager.load_projects().unwrap().unwrap();
        assert!(cached.data.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let (manager, dir) = manager();
        std::fs::write(dir.path().join("projects.json"), "not json").unwrap();

        // The engine maps this to "absent"; the manager itself reports it.
        assert!(manager.load_projects().is_err());
    }
}
