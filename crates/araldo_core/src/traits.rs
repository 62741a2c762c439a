//! Trait seams for the pipeline's external collaborators.

use crate::Topic;
use araldo_error::{DeliveryError, GenerationError};
use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sink-specific message identifier returned on successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct MessageId(pub String);

/// A successfully generated post, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GeneratedPost {
    /// Topic the post was written about.
    topic: Topic,
    /// Generated Markdown text.
    text: String,
}

impl GeneratedPost {
    /// Pair a topic with its generated text.
    pub fn new(topic: Topic, text: impl Into<String>) -> Self {
        Self {
            topic,
            text: text.into(),
        }
    }
}

/// Core trait all text-generation backends implement.
///
/// The pipeline treats any failure uniformly for retry purposes; backends
/// should surface transport, API, and parse failures as distinct
/// [`GenerationError`] kinds for diagnostics only.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate post text for a rendered prompt.
    ///
    /// # Errors
    ///
    /// Returns error if the remote call fails for any reason.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Trait for delivery sink implementations.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Deliver post text to the destination channel.
    ///
    /// # Arguments
    ///
    /// * `text` - Generated Markdown text
    ///
    /// # Returns
    ///
    /// Sink-specific message ID on success.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content validation fails
    /// - The transport or delivery API fails
    async fn send(&self, text: &str) -> Result<MessageId, DeliveryError>;

    /// Sink name (e.g., "telegram").
    fn sink_name(&self) -> &'static str;
}
