//! Tests for the post pipeline.

use araldo_bot::PostPipeline;
use araldo_core::{DeliverySink, MessageId, TextGenerator, TopicCatalog};
use araldo_error::{
    ConfigErrorKind, DeliveryError, DeliveryErrorKind, GenerationError, GenerationErrorKind,
};
use araldo_retry::RetryPolicy;
use araldo_rotation::{DEFAULT_MAX_TOPIC_AGE_DAYS, MemoryUsageStore, TopicSelector};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Generator that fails a scripted number of times before succeeding.
struct ScriptedGenerator {
    failures: usize,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn succeeding() -> Self {
        Self::failing_first(0)
    }

    fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn always_failing() -> Self {
        Self::failing_first(usize::MAX)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(GenerationError::new(GenerationErrorKind::Http(
                "connection reset".to_string(),
            )))
        } else {
            Ok("## Post\n\nGenerated text.".to_string())
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Sink that records delivered text, optionally failing every send.
struct RecordingSink {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSink {
    fn accepting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn rejecting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn send(&self, text: &str) -> Result<MessageId, DeliveryError> {
        if self.fail {
            return Err(DeliveryError::new(DeliveryErrorKind::Http(
                "connection reset".to_string(),
            )));
        }
        self.sent.lock().await.push(text.to_string());
        Ok(MessageId("1".to_string()))
    }

    fn sink_name(&self) -> &'static str {
        "recording"
    }
}

fn pipeline(
    store: Arc<MemoryUsageStore>,
    names: &[&str],
    generator: Arc<ScriptedGenerator>,
    sink: Arc<RecordingSink>,
    retry: RetryPolicy,
) -> PostPipeline {
    let selector = TopicSelector::new(
        store,
        TopicCatalog::new(names.iter().copied()).expect("non-empty catalog"),
        DEFAULT_MAX_TOPIC_AGE_DAYS,
    );
    PostPipeline::builder()
        .selector(selector)
        .generator(generator)
        .sink(sink)
        .retry(retry)
        .build()
        .expect("complete pipeline")
}

#[tokio::test]
async fn successful_cycle_delivers_and_marks_topic() {
    let store = Arc::new(MemoryUsageStore::new());
    let generator = Arc::new(ScriptedGenerator::succeeding());
    let sink = Arc::new(RecordingSink::accepting());
    let pipeline = pipeline(
        Arc::clone(&store),
        &["GraphQL"],
        Arc::clone(&generator),
        Arc::clone(&sink),
        RetryPolicy::default(),
    );

    pipeline.run_cycle().await;

    assert_eq!(sink.sent().await, vec!["## Post\n\nGenerated text."]);
    assert!(store.snapshot().await.contains_key("GraphQL"));
}

#[tokio::test(start_paused = true)]
async fn generation_exhaustion_skips_cycle_without_marking() {
    let store = Arc::new(MemoryUsageStore::new());
    let generator = Arc::new(ScriptedGenerator::always_failing());
    let sink = Arc::new(RecordingSink::accepting());
    let pipeline = pipeline(
        Arc::clone(&store),
        &["GraphQL", "Svelte"],
        Arc::clone(&generator),
        Arc::clone(&sink),
        RetryPolicy::default(),
    );

    assert!(pipeline.generate_post().await.is_none());

    // Four attempts (1 + 3 retries), nothing delivered, nothing marked.
    assert_eq!(generator.calls(), 4);
    assert!(sink.sent().await.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_until_success() {
    let store = Arc::new(MemoryUsageStore::new());
    let generator = Arc::new(ScriptedGenerator::failing_first(2));
    let sink = Arc::new(RecordingSink::accepting());
    let pipeline = pipeline(
        Arc::clone(&store),
        &["Docker"],
        Arc::clone(&generator),
        Arc::clone(&sink),
        RetryPolicy::default(),
    );

    pipeline.run_cycle().await;

    assert_eq!(generator.calls(), 3);
    assert_eq!(sink.sent().await.len(), 1);
    assert!(store.snapshot().await.contains_key("Docker"));
}

#[tokio::test]
async fn delivery_failure_keeps_used_marking() {
    let store = Arc::new(MemoryUsageStore::new());
    let generator = Arc::new(ScriptedGenerator::succeeding());
    let sink = Arc::new(RecordingSink::rejecting());
    let pipeline = pipeline(
        Arc::clone(&store),
        &["Webpack"],
        Arc::clone(&generator),
        Arc::clone(&sink),
        RetryPolicy::default(),
    );

    pipeline.run_cycle().await;

    // No rollback: the topic stays on cooldown even though delivery failed.
    assert!(store.snapshot().await.contains_key("Webpack"));
    assert!(sink.sent().await.is_empty());
}

#[tokio::test]
async fn prompt_embeds_the_selected_topic() {
    let store = Arc::new(MemoryUsageStore::new());
    let generator = Arc::new(ScriptedGenerator::succeeding());
    let sink = Arc::new(RecordingSink::accepting());
    let pipeline = pipeline(
        store,
        &["Svelte"],
        Arc::clone(&generator),
        sink,
        RetryPolicy::default(),
    );

    pipeline.run_cycle().await;

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Svelte\""));
}

#[tokio::test]
async fn builder_rejects_missing_generator() {
    let store = Arc::new(MemoryUsageStore::new());
    let selector = TopicSelector::new(
        store,
        TopicCatalog::new(["a"]).unwrap(),
        DEFAULT_MAX_TOPIC_AGE_DAYS,
    );

    let err = PostPipeline::builder()
        .selector(selector)
        .sink(Arc::new(RecordingSink::accepting()))
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::Invalid(_)));
}
