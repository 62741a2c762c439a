//! Durable persistence for topic usage history.

use araldo_error::{StoreError, StoreErrorKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Mapping from topic identifier to the instant it was last used.
///
/// A `BTreeMap` keeps the serialized form stable and human-diffable. Keys
/// that are not catalog members are tolerated; selection simply ignores
/// them.
pub type UsageMap = BTreeMap<String, DateTime<Utc>>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for usage history persistence backends.
///
/// The whole mapping is loaded and rewritten on each access. The sequence is
/// not transactional, so callers are expected to serialize cycles (a single
/// scheduler task in practice).
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Load the persisted usage map.
    ///
    /// A missing record is not an error and yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns error if the record exists but cannot be read or parsed.
    async fn load(&self) -> StoreResult<UsageMap>;

    /// Overwrite the persisted usage map.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be serialized or written.
    async fn save(&self, map: &UsageMap) -> StoreResult<()>;
}

/// JSON file-backed usage store.
///
/// Serializes the map as pretty-printed JSON with RFC 3339 timestamps at a
/// fixed path.
#[derive(Debug, Clone)]
pub struct JsonUsageStore {
    file_path: PathBuf,
}

impl JsonUsageStore {
    /// Create a store backed by a file path.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &std::path::Path {
        &self.file_path
    }
}

#[async_trait]
impl UsageStore for JsonUsageStore {
    #[instrument(skip(self), fields(path = ?self.file_path))]
    async fn load(&self) -> StoreResult<UsageMap> {
        if !self.file_path.exists() {
            debug!("No usage history file, starting empty");
            return Ok(UsageMap::new());
        }
        let json = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| StoreError::new(StoreErrorKind::FileRead(e.to_string())))?;
        let map: UsageMap = serde_json::from_str(&json)
            .map_err(|e| StoreError::new(StoreErrorKind::Deserialize(e.to_string())))?;
        debug!(entries = map.len(), "Loaded usage history");
        Ok(map)
    }

    #[instrument(skip(self, map), fields(path = ?self.file_path, entries = map.len()))]
    async fn save(&self, map: &UsageMap) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::new(StoreErrorKind::Serialize(e.to_string())))?;
        tokio::fs::write(&self.file_path, json)
            .await
            .map_err(|e| StoreError::new(StoreErrorKind::FileWrite(e.to_string())))?;
        debug!("Saved usage history");
        Ok(())
    }
}

/// In-memory usage store for tests.
///
/// Stores the map behind an `RwLock` for thread-safe access. All data is
/// lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryUsageStore {
    map: Arc<RwLock<UsageMap>>,
}

impl MemoryUsageStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry directly (for testing).
    pub async fn insert(&self, topic: impl Into<String>, last_used: DateTime<Utc>) {
        self.map.write().await.insert(topic.into(), last_used);
    }

    /// Snapshot the current map (for testing).
    pub async fn snapshot(&self) -> UsageMap {
        self.map.read().await.clone()
    }

    /// Number of stored entries (for testing).
    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }
}

#[async_trait]
impl UsageStore for MemoryUsageStore {
    async fn load(&self) -> StoreResult<UsageMap> {
        Ok(self.map.read().await.clone())
    }

    async fn save(&self, map: &UsageMap) -> StoreResult<()> {
        *self.map.write().await = map.clone();
        Ok(())
    }
}
