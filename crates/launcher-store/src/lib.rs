//! # Launcher Store
//!
//! [`SyncStore`](launcher_protocols::SyncStore) implementations.
//!
//! - [`MemorySyncStore`] - process-local, for tests and dry runs
//! - [`FileSyncStore`] - a single JSON document on disk

pub mod store;

pub use store::{FileSyncStore, MemorySyncStore};
