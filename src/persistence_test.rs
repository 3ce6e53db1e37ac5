use super::*;
use crate::store::MemoryStore;
use geocanvas::doc::{DocMode, GeoPoint};

fn doc_with_x(x: f64) -> GeometryDocument {
    GeometryDocument {
        mode: DocMode::TwoD,
        points: vec![GeoPoint {
            id: "A".into(),
            x,
            y: 0.0,
            z: 0.0,
            label: Some("A".into()),
            color: None,
            label_offset: None,
            linked_ids: Vec::new(),
        }],
        ..Default::default()
    }
}

fn slow() -> PersistConfig {
    PersistConfig { debounce_ms: 60_000, queue_capacity: 8 }
}

// =============================================================================
// PersistConfig
// =============================================================================

#[test]
fn config_default_values() {
    let config = PersistConfig::default();
    assert_eq!(config.debounce_ms, DEFAULT_PERSIST_DEBOUNCE_MS);
    assert_eq!(config.queue_capacity, DEFAULT_PERSIST_QUEUE_CAPACITY);
}

#[test]
fn config_from_env_reads_and_clamps() {
    unsafe {
        std::env::set_var("GEOTUTOR_PERSIST_DEBOUNCE_MS", "40");
        std::env::set_var("GEOTUTOR_PERSIST_QUEUE_CAPACITY", "0");
    }
    let config = PersistConfig::from_env();
    unsafe {
        std::env::remove_var("GEOTUTOR_PERSIST_DEBOUNCE_MS");
        std::env::remove_var("GEOTUTOR_PERSIST_QUEUE_CAPACITY");
    }
    assert_eq!(config.debounce_ms, 40);
    assert_eq!(config.queue_capacity, 1);
}

// =============================================================================
// Worker
// =============================================================================

#[tokio::test]
async fn close_flushes_only_the_newest_document() {
    let store = Arc::new(MemoryStore::new());
    let handle = spawn_persistence_worker(store.clone(), "drag".into(), slow());

    for x in [1.0, 2.0, 3.0] {
        assert!(handle.enqueue(doc_with_x(x)).await);
    }
    let stats = handle.close().await.unwrap();

    assert_eq!(stats.received, 3);
    assert_eq!(stats.saved, 1);
    assert_eq!(stats.coalesced, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.load("drag").await.unwrap(), Some(doc_with_x(3.0)));
}

#[tokio::test]
async fn quiet_queue_flushes_before_close() {
    let store = Arc::new(MemoryStore::new());
    let config = PersistConfig { debounce_ms: 5, queue_capacity: 8 };
    let handle = spawn_persistence_worker(store.clone(), "quiet".into(), config);

    handle.enqueue(doc_with_x(7.0)).await;
    for _ in 0..200 {
        if store.save_count() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(store.save_count(), 1);

    // Nothing pending, so closing writes nothing more.
    let stats = handle.close().await.unwrap();
    assert_eq!(stats.saved, 1);
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.load("quiet").await.unwrap(), Some(doc_with_x(7.0)));
}

#[tokio::test]
async fn close_without_documents_saves_nothing() {
    let store = Arc::new(MemoryStore::new());
    let handle = spawn_persistence_worker(store.clone(), "idle".into(), slow());
    let stats = handle.close().await.unwrap();
    assert_eq!(stats, PersistStats::default());
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn failed_save_is_counted() {
    let store = Arc::new(MemoryStore::new());
    // Invalid keys are rejected by every store.
    let handle = spawn_persistence_worker(store.clone(), "not a key".into(), slow());
    handle.enqueue(doc_with_x(1.0)).await;
    let stats = handle.close().await.unwrap();
    assert_eq!(stats.saved, 0);
    assert_eq!(stats.failed, 1);
    assert_eq!(store.save_count(), 0);
}
