//! The sync engine.
//!
//! `SchoolRegistry` owns the four entity collections and drives the
//! optimistic-write protocol around every mutation: apply in memory,
//! attempt the remote write, persist the snapshot locally, settle on a
//! `SyncStatus`. Bootstrap hydration and the consumer-facing read surface
//! live here too.

pub mod engine;

pub use engine::{MutationOutcome, RegistryError, SchoolRegistry, SyncStatus};
