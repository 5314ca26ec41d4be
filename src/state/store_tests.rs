//! Tests for CursorStore and its backends

use super::*;
use crate::types::ItemId;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

// ============================================================================
// In-Memory Tests
// ============================================================================

#[tokio::test]
async fn test_get_set() {
    let store = CursorStore::in_memory();

    assert!(store.get("#rust", "CNN").await.is_none());

    store.set("#rust", "CNN", ItemId::from(100)).await;
    assert_eq!(store.get("#rust", "CNN").await, Some(ItemId::from(100)));

    // Other channels are independent
    assert!(store.get("#other", "CNN").await.is_none());
}

#[tokio::test]
async fn test_set_is_idempotent() {
    let store = CursorStore::in_memory();
    store.set("#rust", "CNN", ItemId::from(7)).await;
    let first = store.snapshot().await;

    store.set("#rust", "CNN", ItemId::from(7)).await;
    assert_eq!(store.snapshot().await, first);
}

#[tokio::test]
async fn test_touch_keeps_existing_cursor() {
    let store = CursorStore::in_memory();
    store.touch("#rust", "CNN").await;
    assert!(store.get("#rust", "CNN").await.is_none());
    assert!(store.snapshot().await.channel("#rust").is_some());

    store.set("#rust", "CNN", ItemId::from(9)).await;
    store.touch("#rust", "CNN").await;
    assert_eq!(store.get("#rust", "CNN").await, Some(ItemId::from(9)));
}

#[tokio::test]
async fn test_clones_share_state() {
    let store = CursorStore::in_memory();
    let other = store.clone();

    other.set("#rust", "term", ItemId::from(1)).await;
    assert_eq!(store.get("#rust", "term").await, Some(ItemId::from(1)));
}

#[tokio::test]
async fn test_concurrent_mutation_and_flush() {
    let store = CursorStore::in_memory();

    let mut handles = Vec::new();
    for i in 0..20u64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.set("#rust", &format!("key{i}"), ItemId::from(i)).await;
            store.flush().await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.channel("#rust").unwrap().len(), 20);
}

// ============================================================================
// Memory Backend Tests
// ============================================================================

#[tokio::test]
async fn test_memory_backend_round_trip() {
    let backend = Arc::new(MemoryBackend::new());
    let store = CursorStore::load(backend.clone()).await.unwrap();

    store.set("#rust", "CNN", ItemId::from(5)).await;
    store.flush().await.unwrap();
    assert!(backend.saved_json().await.unwrap().contains("\"CNN\":5"));

    let reloaded = CursorStore::load(backend).await.unwrap();
    assert_eq!(reloaded.get("#rust", "CNN").await, Some(ItemId::from(5)));
}

#[tokio::test]
async fn test_memory_backend_malformed_is_error() {
    let backend = Arc::new(MemoryBackend::from_json("{not json"));
    let result = CursorStore::load(backend).await;
    assert!(matches!(result, Err(crate::Error::State { .. })));
}

// ============================================================================
// File Backend Tests
// ============================================================================

#[tokio::test]
async fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweety.json");

    let store = CursorStore::from_file(&path).await.unwrap();
    store.set("#rust", "CNN", ItemId::from(1_234_567_890_123)).await;
    store.set("#rust", "breaking news", ItemId::from("55")).await;
    store.flush().await.unwrap();

    let reloaded = CursorStore::from_file(&path).await.unwrap();
    assert_eq!(
        reloaded.get("#rust", "CNN").await,
        Some(ItemId::from(1_234_567_890_123))
    );
    assert_eq!(
        reloaded.get("#rust", "breaking news").await,
        Some(ItemId::from("55"))
    );
}

#[tokio::test]
async fn test_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let store = CursorStore::from_file(dir.path().join("absent.json"))
        .await
        .unwrap();
    assert!(store.snapshot().await.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_location_is_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("plain.json");
    std::fs::write(&blocker, "{}").unwrap();

    // A regular file used as a directory fails with ENOTDIR, not NotFound
    let result = CursorStore::from_file(blocker.join("tweety.json")).await;
    assert!(matches!(result, Err(crate::Error::State { .. })));
}

#[tokio::test]
async fn test_malformed_file_is_error_and_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweety.json");
    std::fs::write(&path, "{\"#rust\": [1, 2").unwrap();

    let result = CursorStore::from_file(&path).await;
    assert!(matches!(result, Err(crate::Error::State { .. })));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"#rust\": [1, 2");
}

#[tokio::test]
async fn test_loads_legacy_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweety.json");
    std::fs::write(&path, r##"{"#rust": {"CNN": 123, "nasa": null}}"##).unwrap();

    let store = CursorStore::from_file(&path).await.unwrap();
    assert_eq!(store.get("#rust", "CNN").await, Some(ItemId::from(123)));
    assert!(store.get("#rust", "nasa").await.is_none());
}

#[tokio::test]
async fn test_repeated_flush_keeps_entries_and_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tweety.json");

    let store = CursorStore::from_file(&path).await.unwrap();
    store.set("#a", "x", ItemId::from(1)).await;
    store.flush().await.unwrap();
    store.set("#b", "y", ItemId::from(2)).await;
    store.flush().await.unwrap();
    store.flush().await.unwrap();

    let reloaded = CursorStore::from_file(&path).await.unwrap();
    assert_eq!(reloaded.get("#a", "x").await, Some(ItemId::from(1)));
    assert_eq!(reloaded.get("#b", "y").await, Some(ItemId::from(2)));

    let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_periodic_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweety.json");

    let store = CursorStore::from_file(&path).await.unwrap();
    store.set("#rust", "CNN", ItemId::from(3)).await;

    let (stop, handle) = store.spawn_periodic_flush(Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(120)).await;
    stop.send(true).unwrap();
    handle.await.unwrap();

    assert!(path.exists());
    let reloaded = CursorStore::from_file(&path).await.unwrap();
    assert_eq!(reloaded.get("#rust", "CNN").await, Some(ItemId::from(3)));
}
