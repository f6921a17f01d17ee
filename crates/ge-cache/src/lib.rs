//! Persistent evaluation-result cache.
//!
//! The store is an optimization, never a correctness dependency: every
//! operation degrades to "compute it again" on any cache problem, and a
//! corrupted store file is treated as empty rather than as an error.

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{ResultStore, StoreError};
