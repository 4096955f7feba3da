//! Synchronized store backends.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use launcher_protocols::{StorageError, SyncStore};

/// Reject any item whose serialized size exceeds `quota`.
fn check_item_quota(items: &Map<String, Value>, quota: Option<usize>) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    for (key, value) in items {
        let size = key.len() + serde_json::to_string(value)?.len();
        if size > quota {
            return Err(StorageError::QuotaExceeded(format!(
                "item '{}' is {} bytes, limit is {}",
                key, size, quota
            )));
        }
    }
    Ok(())
}

fn select(items: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| items.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect()
}

/// In-memory store.
///
/// Counts successful writes so callers can assert persistence behavior.
pub struct MemorySyncStore {
    items: RwLock<Map<String, Value>>,
    writes: AtomicUsize,
    item_quota: Option<usize>,
}

impl MemorySyncStore {
    pub fn new() -> Self {
        Self::with_items(Map::new())
    }

    /// Create a store pre-seeded with `items`. Seeding is not a write.
    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            items: RwLock::new(items),
            writes: AtomicUsize::new(0),
            item_quota: None,
        }
    }

    /// Limit the serialized size of each item.
    pub fn with_item_quota(mut self, bytes: usize) -> Self {
        self.item_quota = Some(bytes);
        self
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of everything currently stored.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.items.read().await.clone()
    }
}

impl Default for MemorySyncStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyncStore for MemorySyncStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let items = self.items.read().await;
        Ok(select(&items, keys))
    }

    async fn set(&self, new_items: Map<String, Value>) -> Result<(), StorageError> {
        check_item_quota(&new_items, self.item_quota)?;
        let mut items = self.items.write().await;
        items.extend(new_items);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        for key in keys {
            items.remove(*key);
        }
        Ok(())
    }
}

/// Store backed by one JSON object in a file.
///
/// Every write rewrites the whole document. Writers in the same process are
/// serialized; across processes the last writer wins.
pub struct FileSyncStore {
    path: PathBuf,
    lock: Mutex<()>,
    item_quota: Option<usize>,
}

impl FileSyncStore {
    /// Open a store at `path`, creating its parent directory.
    ///
    /// The file itself is created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        debug!("FileSyncStore initialized at {:?}", path);

        Ok(Self {
            path,
            lock: Mutex::new(()),
            item_quota: None,
        })
    }

    pub fn with_item_quota(mut self, bytes: usize) -> Self {
        self.item_quota = Some(bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document.
    ///
    /// A missing, empty or unparseable file is an empty store; the next
    /// write replaces it. Only I/O failures are errors.
    async fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(items)) => Ok(items),
            Ok(other) => {
                warn!("Store file {:?} does not hold an object, found {}; treating it as empty", self.path, other);
                Ok(Map::new())
            }
            Err(e) => {
                warn!("Store file {:?} is not valid JSON, treating it as empty: {}", self.path, e);
                Ok(Map::new())
            }
        }
    }

    async fn write_all(&self, items: &Map<String, Value>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SyncStore for FileSyncStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let _guard = self.lock.lock().await;
        let items = self.read_all().await?;
        Ok(select(&items, keys))
    }

    async fn set(&self, new_items: Map<String, Value>) -> Result<(), StorageError> {
        check_item_quota(&new_items, self.item_quota)?;
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        let keys: Vec<String> = new_items.keys().cloned().collect();
        items.extend(new_items);
        self.write_all(&items).await?;
        debug!("Wrote {:?} to {:?}", keys, self.path);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        let before = items.len();
        for key in keys {
            items.remove(*key);
        }
        if items.len() != before {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
