//! Post pipeline: select → generate → mark used → deliver.

use araldo_core::{DeliverySink, GeneratedPost, PromptTemplate, TextGenerator};
use araldo_error::{ConfigError, ConfigErrorKind};
use araldo_retry::RetryPolicy;
use araldo_rotation::TopicSelector;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Orchestrates one posting cycle end to end.
///
/// Within a cycle, generation strictly precedes usage-marking, which
/// strictly precedes delivery. No state is retained across cycles except
/// the usage store. Nothing in a cycle is process-fatal: every failure path
/// degrades to "no post this cycle".
pub struct PostPipeline {
    selector: TopicSelector,
    generator: Arc<dyn TextGenerator>,
    sink: Arc<dyn DeliverySink>,
    retry: RetryPolicy,
    template: PromptTemplate,
}

impl std::fmt::Debug for PostPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostPipeline")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .finish_non_exhaustive()
    }
}

impl PostPipeline {
    /// Create a new pipeline with builder pattern.
    pub fn builder() -> PostPipelineBuilder {
        PostPipelineBuilder::default()
    }

    /// Generate a post about a freshly selected topic.
    ///
    /// Selects a non-recently-used topic, renders the prompt, and invokes
    /// the generation backend under the retry policy. The topic is marked
    /// used only after generation succeeds; if retries are exhausted the
    /// usage store is left untouched and `None` signals "no post this
    /// cycle".
    #[tracing::instrument(skip(self))]
    pub async fn generate_post(&self) -> Option<GeneratedPost> {
        let topic = match self.selector.pick_random().await {
            Ok(topic) => topic,
            Err(error) => {
                error!(error = %error, "Topic selection failed");
                return None;
            }
        };

        let prompt = self.template.render(&topic);
        debug!(topic = %topic, "Requesting post generation");

        match self.retry.run(|| self.generator.generate(&prompt)).await {
            Ok(text) => {
                info!(
                    topic = %topic,
                    provider = self.generator.provider_name(),
                    model = self.generator.model_name(),
                    chars = text.len(),
                    "Post generated"
                );
                self.selector.mark_used(&topic).await;
                Some(GeneratedPost::new(topic, text))
            }
            Err(error) => {
                error!(
                    topic = %topic,
                    error = %error,
                    "Post generation failed after exhausting retries"
                );
                None
            }
        }
    }

    /// Run one full posting cycle.
    ///
    /// Delivery failure is logged, not retried, and does not roll back the
    /// used marking committed on generation success.
    #[tracing::instrument(skip(self), fields(cycle_id = %Uuid::new_v4()))]
    pub async fn run_cycle(&self) {
        info!("Starting posting cycle");

        let Some(post) = self.generate_post().await else {
            info!("No post this cycle");
            return;
        };

        match self.sink.send(post.text()).await {
            Ok(message_id) => {
                info!(
                    topic = %post.topic(),
                    %message_id,
                    sink = self.sink.sink_name(),
                    "Post delivered"
                );
            }
            Err(error) => {
                error!(
                    topic = %post.topic(),
                    error = %error,
                    sink = self.sink.sink_name(),
                    "Delivery failed"
                );
            }
        }
    }
}

/// Builder for creating PostPipeline instances.
#[derive(Default)]
pub struct PostPipelineBuilder {
    selector: Option<TopicSelector>,
    generator: Option<Arc<dyn TextGenerator>>,
    sink: Option<Arc<dyn DeliverySink>>,
    retry: Option<RetryPolicy>,
    template: Option<PromptTemplate>,
}

impl PostPipelineBuilder {
    /// Set the topic selector.
    pub fn selector(mut self, selector: TopicSelector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Set the generation backend.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the delivery sink.
    pub fn sink(mut self, sink: Arc<dyn DeliverySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the generation retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Set the prompt template.
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Build the pipeline.
    ///
    /// Retry policy and template fall back to their defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns error if selector, generator, or sink are missing.
    pub fn build(self) -> Result<PostPipeline, ConfigError> {
        let selector = self.selector.ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Invalid(
                "Pipeline selector is required".to_string(),
            ))
        })?;

        let generator = self.generator.ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Invalid(
                "Pipeline generator is required".to_string(),
            ))
        })?;

        let sink = self.sink.ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Invalid(
                "Pipeline sink is required".to_string(),
            ))
        })?;

        Ok(PostPipeline {
            selector,
            generator,
            sink,
            retry: self.retry.unwrap_or_default(),
            template: self.template.unwrap_or_default(),
        })
    }
}
