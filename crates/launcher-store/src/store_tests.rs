use super::*;
use serde_json::json;
use tempfile::TempDir;

fn items(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// ============================================================================
// MemorySyncStore
// ============================================================================

#[tokio::test]
async fn test_memory_get_returns_only_present_keys() {
    let store = MemorySyncStore::with_items(items(json!({ "zones": {}, "other": 1 })));

    let got = store.get(&["zones", "hotkeys"]).await.unwrap();
    assert_eq!(got.len(), 1);
    assert!(got.contains_key("zones"));
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_memory_set_merges() {
    let store = MemorySyncStore::with_items(items(json!({ "a": 1, "b": 2 })));
    store.set(items(json!({ "b": 3, "c": 4 }))).await.unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot["a"], 1);
    assert_eq!(snapshot["b"], 3);
    assert_eq!(snapshot["c"], 4);
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_memory_remove() {
    let store = MemorySyncStore::with_items(items(json!({ "a": 1, "b": 2 })));
    store.remove(&["a", "missing"]).await.unwrap();
    assert_eq!(store.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_memory_item_quota() {
    let store = MemorySyncStore::new().with_item_quota(16);
    let err = store
        .set(items(json!({ "zones": "a value that is far too long" })))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded(_)));
    assert_eq!(store.write_count(), 0);
    assert!(store.snapshot().await.is_empty());
}

// ============================================================================
// FileSyncStore
// ============================================================================

#[tokio::test]
async fn test_file_missing_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSyncStore::new(temp_dir.path().join("sync.json")).await.unwrap();

    let got = store.get(&["zones"]).await.unwrap();
    assert!(got.is_empty());
}

#[tokio::test]
async fn test_file_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("sync.json");
    let store = FileSyncStore::new(&path).await.unwrap();

    store.set(items(json!({ "zones": {} }))).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_file_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sync.json");

    {
        let store = FileSyncStore::new(&path).await.unwrap();
        store.set(items(json!({ "zones": { "0-0": { "name": "Default", "hotkeys": [] } } })))
            .await
            .unwrap();
        store.set(items(json!({ "other": true }))).await.unwrap();
    }

    let reopened = FileSyncStore::new(&path).await.unwrap();
    let got = reopened.get(&["zones", "other"]).await.unwrap();
    assert_eq!(got["zones"]["0-0"]["name"], "Default");
    assert_eq!(got["other"], true);
}

#[tokio::test]
async fn test_file_remove() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSyncStore::new(temp_dir.path().join("sync.json")).await.unwrap();

    store.set(items(json!({ "hotkeys": [], "zones": {} }))).await.unwrap();
    store.remove(&["hotkeys"]).await.unwrap();

    let got = store.get(&["hotkeys", "zones"]).await.unwrap();
    assert!(!got.contains_key("hotkeys"));
    assert!(got.contains_key("zones"));
}

#[tokio::test]
async fn test_file_corrupt_document_reads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sync.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileSyncStore::new(&path).await.unwrap();
    assert!(store.get(&["zones"]).await.unwrap().is_empty());

    std::fs::write(&path, "{not json").unwrap();
    assert!(store.get(&["zones"]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_corrupt_document_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sync.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileSyncStore::new(&path).await.unwrap();
    store.set(items(json!({ "zones": { "0-0": {} } }))).await.unwrap();

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({ "zones": { "0-0": {} } }));
}

#[tokio::test]
async fn test_file_item_quota() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sync.json");
    let store = FileSyncStore::new(&path).await.unwrap().with_item_quota(8);

    let err = store.set(items(json!({ "zones": { "0-0": {} } }))).await.unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded(_)));
    assert!(!path.exists());
}
