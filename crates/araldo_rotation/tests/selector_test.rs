//! Tests for topic selection and cooldown behavior.

use araldo_core::{Topic, TopicCatalog};
use araldo_rotation::{
    DEFAULT_MAX_TOPIC_AGE_DAYS, JsonUsageStore, MemoryUsageStore, TopicSelector, UsageMap,
};
use chrono::{Duration, Utc};
use std::sync::Arc;

fn catalog(names: &[&str]) -> TopicCatalog {
    TopicCatalog::new(names.iter().copied()).expect("non-empty catalog")
}

fn selector(store: Arc<MemoryUsageStore>, names: &[&str]) -> TopicSelector {
    TopicSelector::new(store, catalog(names), DEFAULT_MAX_TOPIC_AGE_DAYS)
}

#[tokio::test]
async fn recently_used_topic_is_excluded() {
    let store = Arc::new(MemoryUsageStore::new());
    store.insert("a", Utc::now() - Duration::days(1)).await;
    let selector = selector(Arc::clone(&store), &["a", "b", "c"]);

    let names: Vec<String> = selector
        .available_topics()
        .await
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[tokio::test]
async fn topic_reappears_after_cooldown() {
    let store = Arc::new(MemoryUsageStore::new());
    store.insert("a", Utc::now() - Duration::days(8)).await;
    let selector = selector(Arc::clone(&store), &["a", "b"]);

    let available = selector.available_topics().await;
    assert_eq!(available.len(), 2);

    // Cleanup is persisted: the expired entry is gone from the store too.
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn entry_exactly_at_window_boundary_expires() {
    let store = Arc::new(MemoryUsageStore::new());
    store.insert("a", Utc::now() - Duration::days(7)).await;
    let selector = selector(Arc::clone(&store), &["a"]);

    let available = selector.available_topics().await;
    assert_eq!(available, vec![Topic::from("a")]);
}

#[tokio::test]
async fn entry_just_inside_window_is_still_excluded() {
    let store = Arc::new(MemoryUsageStore::new());
    store
        .insert("a", Utc::now() - (Duration::days(7) - Duration::hours(1)))
        .await;
    let selector = selector(Arc::clone(&store), &["a", "b"]);

    let available = selector.available_topics().await;
    assert_eq!(available, vec![Topic::from("b")]);
}

#[tokio::test]
async fn unknown_store_keys_are_tolerated() {
    let store = Arc::new(MemoryUsageStore::new());
    store.insert("Cobol", Utc::now() - Duration::hours(1)).await;
    let selector = selector(Arc::clone(&store), &["a", "b"]);

    // Not a catalog member: ignored by selection, not an error.
    let available = selector.available_topics().await;
    assert_eq!(available.len(), 2);

    // Still young, so cleanup keeps it around.
    assert!(store.snapshot().await.contains_key("Cobol"));
}

#[tokio::test]
async fn exhaustion_clears_store_and_picks_from_full_catalog() {
    let store = Arc::new(MemoryUsageStore::new());
    let recent = Utc::now() - Duration::hours(1);
    for name in ["a", "b", "c"] {
        store.insert(name, recent).await;
    }
    let selector = selector(Arc::clone(&store), &["a", "b", "c"]);

    let topic = selector.pick_random().await.unwrap();
    assert!(selector.catalog().contains(topic.as_str()));

    // The reset is global: even entries well inside the cooldown window are
    // discarded, and the persisted map ends up empty.
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn pick_random_never_returns_a_cooling_topic() {
    let store = Arc::new(MemoryUsageStore::new());
    store.insert("a", Utc::now() - Duration::days(1)).await;
    let selector = selector(Arc::clone(&store), &["a", "b", "c"]);

    for _ in 0..50 {
        let topic = selector.pick_random().await.unwrap();
        assert_ne!(topic.as_str(), "a");
    }
}

#[tokio::test]
async fn mark_used_records_current_time() {
    let store = Arc::new(MemoryUsageStore::new());
    let selector = selector(Arc::clone(&store), &["a", "b"]);

    selector.mark_used(&Topic::from("b")).await;

    let snapshot = store.snapshot().await;
    let last_used = snapshot.get("b").expect("entry for b");
    assert!(Utc::now() - *last_used < Duration::minutes(1));
}

#[tokio::test]
async fn cleanup_is_idempotent() {
    let store = Arc::new(MemoryUsageStore::new());
    let selector = selector(store, &["young", "old"]);

    let now = Utc::now();
    let mut map = UsageMap::new();
    map.insert("young".to_string(), now - Duration::days(1));
    map.insert("old".to_string(), now - Duration::days(8));

    let once = selector.cleanup(&map, now);
    let twice = selector.cleanup(&once, now);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
    assert!(once.contains_key("young"));
}

#[tokio::test]
async fn unreadable_store_degrades_to_full_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("used_topics.json");
    std::fs::write(&path, "not json {{").unwrap();

    let store = Arc::new(JsonUsageStore::new(&path));
    let selector = TopicSelector::new(store, catalog(&["a", "b"]), DEFAULT_MAX_TOPIC_AGE_DAYS);

    let available = selector.available_topics().await;
    assert_eq!(available.len(), 2);
    assert!(selector.pick_random().await.is_ok());
}

#[tokio::test]
async fn unwritable_store_is_best_effort() {
    let store = Arc::new(JsonUsageStore::new("/nonexistent-dir/used_topics.json"));
    let selector = TopicSelector::new(store, catalog(&["a"]), DEFAULT_MAX_TOPIC_AGE_DAYS);

    // Neither the cleanup write-back nor the usage marking can crash the
    // cycle when the disk is unwritable.
    let topic = selector.pick_random().await.unwrap();
    selector.mark_used(&topic).await;
}
