//! Topic selection against the usage history.

use crate::{UsageMap, UsageStore};
use araldo_core::{Topic, TopicCatalog};
use araldo_error::{RotationError, RotationErrorKind};
use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default cooldown window in days.
pub const DEFAULT_MAX_TOPIC_AGE_DAYS: i64 = 7;

/// Selects a non-recently-used topic from the catalog.
///
/// The selector is the sole reader and writer of the usage store. Store
/// failures never escalate: a failed load degrades to an empty map and a
/// failed save is logged and dropped, so a broken disk costs at most some
/// repetition, never a missed post.
pub struct TopicSelector {
    store: Arc<dyn UsageStore>,
    catalog: TopicCatalog,
    max_age: Duration,
}

impl TopicSelector {
    /// Create a selector over a usage store and catalog.
    ///
    /// `max_age_days` is the cooldown window: a topic used within the last
    /// `max_age_days` days is excluded from selection.
    pub fn new(store: Arc<dyn UsageStore>, catalog: TopicCatalog, max_age_days: i64) -> Self {
        Self {
            store,
            catalog,
            max_age: Duration::days(max_age_days),
        }
    }

    /// The catalog this selector draws from.
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Drop usage entries that have aged out of the cooldown window.
    ///
    /// Retention is strict less-than: an entry exactly `max_age_days` old is
    /// removed. Idempotent at a fixed instant.
    pub fn cleanup(&self, map: &UsageMap, now: DateTime<Utc>) -> UsageMap {
        map.iter()
            .filter(|(_, last_used)| now - **last_used < self.max_age)
            .map(|(topic, last_used)| (topic.clone(), *last_used))
            .collect()
    }

    /// Catalog topics currently outside the cooldown window, in catalog
    /// order.
    ///
    /// Cleanup is applied and persisted as a side effect, so expired entries
    /// are pruned from durable storage on every selection cycle.
    #[instrument(skip(self))]
    pub async fn available_topics(&self) -> Vec<Topic> {
        let map = self.load_degraded().await;
        let cleaned = self.cleanup(&map, Utc::now());
        if cleaned.len() < map.len() {
            debug!(
                expired = map.len() - cleaned.len(),
                "Dropped usage entries older than the cooldown window"
            );
        }
        self.save_best_effort(&cleaned).await;

        self.catalog
            .iter()
            .filter(|topic| !cleaned.contains_key(topic.as_str()))
            .cloned()
            .collect()
    }

    /// Pick a topic uniformly at random among the available ones.
    ///
    /// When every catalog topic is inside the cooldown window, the entire
    /// usage history is cleared (including entries younger than the window)
    /// and selection retries once against the full catalog.
    ///
    /// # Errors
    ///
    /// Returns `RotationErrorKind::Exhausted` if no topic is available even
    /// after the reset. Unreachable with a non-empty catalog; the bound
    /// exists so selection can never loop forever.
    #[instrument(skip(self))]
    pub async fn pick_random(&self) -> Result<Topic, RotationError> {
        for _ in 0..2 {
            let available = self.available_topics().await;
            if let Some(topic) = available.choose(&mut rand::rng()) {
                debug!(topic = %topic, eligible = available.len(), "Selected topic");
                return Ok(topic.clone());
            }
            warn!("Every topic is inside the cooldown window, resetting usage history");
            self.save_best_effort(&UsageMap::new()).await;
        }
        Err(RotationError::new(RotationErrorKind::Exhausted))
    }

    /// Record that a topic was used just now.
    ///
    /// Called only after a generation attempt succeeds for the topic.
    /// Persistence is best-effort.
    #[instrument(skip(self), fields(topic = %topic))]
    pub async fn mark_used(&self, topic: &Topic) {
        let mut map = self.load_degraded().await;
        map.insert(topic.as_str().to_string(), Utc::now());
        self.save_best_effort(&map).await;
        info!("Marked topic as used");
    }

    /// Load the usage map, degrading a failed read to an empty map.
    async fn load_degraded(&self) -> UsageMap {
        match self.store.load().await {
            Ok(map) => map,
            Err(error) => {
                warn!(error = %error, "Failed to load usage history, treating as empty");
                UsageMap::new()
            }
        }
    }

    /// Persist the usage map, logging and dropping any failure.
    async fn save_best_effort(&self, map: &UsageMap) {
        if let Err(error) = self.store.save(map).await {
            warn!(error = %error, "Failed to save usage history");
        }
    }
}
