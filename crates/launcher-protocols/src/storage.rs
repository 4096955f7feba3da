//! Synchronized key-value store protocol.
//!
//! Mirrors the platform's synced extension storage: top-level string keys
//! mapped to JSON values, read by key set and written by merge.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Key-value store the registry is persisted into.
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// Read the given keys. Absent keys are omitted from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError>;

    /// Merge the given items into the store, overwriting existing keys.
    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError>;

    /// Remove the given keys. Missing keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}
