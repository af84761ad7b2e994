//! campuscache - offline-first sync engine for a school registry.
//!
//! The registry holds one institution profile plus projects, their
//! class-groups and teacher assignments, and keeps them usable while the
//! authoritative remote store is unreachable. Every mutation is applied
//! optimistically to memory, snapshotted to a durable local cache, and
//! opportunistically written to the remote store; a three-valued
//! [`SyncStatus`](registry::SyncStatus) tells callers whether local state
//! currently matches the remote.
//!
//! ```no_run
//! use campuscache::{CacheManager, RegistryConfig, RestClient, SchoolRegistry};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RegistryConfig::new("https://registry.example.org/api");
//! let remote = RestClient::new(&config)?;
//! let cache = CacheManager::new(config.cache_dir.clone())?;
//!
//! let mut registry = SchoolRegistry::new(remote, cache);
//! registry.load().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod registry;

pub use api::{RemoteError, RemoteStore, RestClient};
pub use cache::CacheManager;
pub use config::RegistryConfig;
pub use registry::{MutationOutcome, RegistryError, SchoolRegistry, SyncStatus};
