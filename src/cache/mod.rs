//! Local durable cache for offline fallback.
//!
//! This module provides the `CacheManager` for persisting the last-known
//! local state of each registry collection. Snapshots are stored as JSON,
//! one file per collection, and are full replaces - never deltas.
//!
//! Cached collections:
//! - the institution profile
//! - projects
//! - class-groups
//! - assignments

pub mod manager;

pub use manager::{CacheManager, CachedData};
