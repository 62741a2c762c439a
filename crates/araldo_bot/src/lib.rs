//! Pipeline orchestration and scheduling for the araldo posting bot.
//!
//! This crate wires the workspace together:
//!
//! - **Config**: TOML configuration with validated preconditions
//! - **Pipeline**: select topic → generate with retry → mark used → deliver
//! - **Scheduler**: daily cadences that trigger the pipeline at fixed local
//!   times, plus one cycle at process start
//!
//! # Example
//!
//! ```no_run
//! use araldo_bot::{BotConfig, PostPipeline};
//! use araldo_models::OpenAiClient;
//! use araldo_rotation::{JsonUsageStore, TopicSelector};
//! use araldo_telegram::NoOpSink;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BotConfig::from_file("araldo.toml")?;
//! let store = Arc::new(JsonUsageStore::new(config.rotation().store_path()));
//! let selector = TopicSelector::new(
//!     store,
//!     config.catalog()?,
//!     *config.rotation().max_topic_age_days(),
//! );
//!
//! let pipeline = PostPipeline::builder()
//!     .selector(selector)
//!     .generator(Arc::new(OpenAiClient::new("api-key", "gpt-4o-mini")))
//!     .sink(Arc::new(NoOpSink::new()))
//!     .retry(config.retry_policy())
//!     .template(config.template())
//!     .build()?;
//!
//! pipeline.run_cycle().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod pipeline;
mod scheduler;

pub use config::{
    BotConfig, BotSection, DeliveryConfig, GenerationConfig, RetryConfig, RotationConfig,
    ScheduleConfig,
};
pub use pipeline::{PostPipeline, PostPipelineBuilder};
pub use scheduler::{DailyCadence, PostDaemon};
