//! Topic rotation with persisted cooldown history.
//!
//! This crate is the stateful heart of araldo. It decides which topic the
//! next post is written about: catalog topics used within the cooldown
//! window (7 days by default) are excluded, usage history is persisted as a
//! small JSON file, and when every topic is on cooldown the history is reset
//! wholesale so posting never stalls.
//!
//! The usage store is an explicit, injected dependency so the selector can
//! be exercised against an in-memory double in tests.
//!
//! # Example
//!
//! ```no_run
//! use araldo_core::TopicCatalog;
//! use araldo_rotation::{JsonUsageStore, TopicSelector, DEFAULT_MAX_TOPIC_AGE_DAYS};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(JsonUsageStore::new("used_topics.json"));
//! let selector = TopicSelector::new(store, TopicCatalog::default(), DEFAULT_MAX_TOPIC_AGE_DAYS);
//!
//! let topic = selector.pick_random().await?;
//! // ... generate a post about `topic` ...
//! selector.mark_used(&topic).await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod selector;
mod store;

pub use selector::{DEFAULT_MAX_TOPIC_AGE_DAYS, TopicSelector};
pub use store::{JsonUsageStore, MemoryUsageStore, StoreResult, UsageMap, UsageStore};
