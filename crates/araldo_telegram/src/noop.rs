//! No-op sink implementation for dry runs.

use araldo_core::{DeliverySink, MessageId};
use araldo_error::DeliveryError;
use async_trait::async_trait;
use tracing::debug;

/// Sink implementation that does nothing.
///
/// Used for dry runs and for pipelines exercised in tests without a real
/// destination channel.
#[derive(Debug, Clone, Default)]
pub struct NoOpSink;

impl NoOpSink {
    /// Create a new no-op sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DeliverySink for NoOpSink {
    async fn send(&self, text: &str) -> Result<MessageId, DeliveryError> {
        debug!(
            chars = text.len(),
            "NoOpSink: send() called (no action taken)"
        );
        Ok(MessageId("noop".to_string()))
    }

    fn sink_name(&self) -> &'static str {
        "noop"
    }
}
