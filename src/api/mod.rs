//! Remote store boundary.
//!
//! This module provides the `RemoteStore` trait - the abstracted CRUD
//! surface the sync engine writes through - and `RestClient`, the
//! HTTP implementation of it. Retry policy does not live here: a failed
//! call is reported once and the engine decides what to do with it.

pub mod client;
pub mod error;

pub use client::{RemoteStore, RestClient};
pub use error::RemoteError;
