//! Bot configuration types and loading.

use araldo_core::{
    DEFAULT_PROMPT_TEMPLATE, DEFAULT_SYSTEM_PROMPT, DEFAULT_TOPICS, PromptTemplate, TopicCatalog,
};
use araldo_error::{ConfigError, ConfigErrorKind, RotationError};
use araldo_retry::RetryPolicy;
use araldo_rotation::DEFAULT_MAX_TOPIC_AGE_DAYS;
use chrono::{FixedOffset, NaiveTime};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Bot identity and topic catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct BotSection {
    /// Bot name.
    #[builder(default = default_name())]
    #[serde(default = "default_name")]
    name: String,

    /// Bot description.
    #[builder(default = default_description())]
    #[serde(default = "default_description")]
    description: String,

    /// Ordered topic catalog.
    #[builder(default = default_topics())]
    #[serde(default = "default_topics")]
    topics: Vec<String>,
}

fn default_name() -> String {
    "araldo".to_string()
}

fn default_description() -> String {
    "Scheduled topical posting bot".to_string()
}

fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            topics: default_topics(),
        }
    }
}

/// Posting schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct ScheduleConfig {
    /// Local times of day ("HH:MM") to post at.
    #[builder(default = default_post_times())]
    #[serde(default = "default_post_times")]
    post_times: Vec<String>,

    /// UTC offset of the posting timezone, in hours.
    #[builder(default = 3)]
    #[serde(default = "default_utc_offset")]
    utc_offset_hours: i32,
}

fn default_post_times() -> Vec<String> {
    vec!["09:00".to_string(), "18:00".to_string()]
}

fn default_utc_offset() -> i32 {
    3
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            post_times: default_post_times(),
            utc_offset_hours: default_utc_offset(),
        }
    }
}

impl ScheduleConfig {
    /// The posting timezone as a fixed offset.
    ///
    /// # Errors
    ///
    /// Returns error if the offset is outside -12..=14 hours.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::Invalid(format!(
                "schedule.utc_offset_hours {} is not a valid UTC offset",
                self.utc_offset_hours
            )))
        })
    }

    /// Parsed post times.
    ///
    /// # Errors
    ///
    /// Returns error if any entry is not a valid "HH:MM" time.
    pub fn times(&self) -> Result<Vec<NaiveTime>, ConfigError> {
        self.post_times
            .iter()
            .map(|s| {
                NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
                    ConfigError::new(ConfigErrorKind::Invalid(format!(
                        "schedule.post_times entry '{}' is not a valid HH:MM time",
                        s
                    )))
                })
            })
            .collect()
    }
}

/// Text generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct GenerationConfig {
    /// Model identifier.
    #[builder(default = default_model())]
    #[serde(default = "default_model")]
    model: String,

    /// API base URL (OpenAI-compatible).
    #[builder(default = default_api_base())]
    #[serde(default = "default_api_base")]
    api_base: String,

    /// Upper bound on generated tokens.
    #[builder(default = 800)]
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature.
    #[builder(default = 0.7)]
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// System prompt sent with every request.
    #[builder(default = default_system_prompt())]
    #[serde(default = "default_system_prompt")]
    system_prompt: String,

    /// User-prompt template with a `{topic}` placeholder.
    #[builder(default = default_prompt_template())]
    #[serde(default = "default_prompt_template")]
    prompt_template: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    araldo_models::OPENAI_API_BASE.to_string()
}

fn default_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            prompt_template: default_prompt_template(),
        }
    }
}

/// Retry configuration for the generation call.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct RetryConfig {
    /// Maximum retries after the first attempt.
    #[builder(default = 3)]
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// Delay before the first retry; doubles after every failure.
    #[builder(default = 1000)]
    #[serde(default = "default_initial_delay_ms")]
    initial_delay_ms: u64,

    /// Optional per-attempt deadline in seconds.
    #[builder(default)]
    #[serde(default)]
    attempt_timeout_secs: Option<u64>,
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            attempt_timeout_secs: None,
        }
    }
}

/// Topic rotation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct RotationConfig {
    /// Path of the usage history file.
    #[builder(default = default_store_path())]
    #[serde(default = "default_store_path")]
    store_path: PathBuf,

    /// Cooldown window in days.
    #[builder(default = DEFAULT_MAX_TOPIC_AGE_DAYS)]
    #[serde(default = "default_max_topic_age_days")]
    max_topic_age_days: i64,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("used_topics.json")
}

fn default_max_topic_age_days() -> i64 {
    DEFAULT_MAX_TOPIC_AGE_DAYS
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            max_topic_age_days: default_max_topic_age_days(),
        }
    }
}

/// Delivery configuration.
///
/// The bot token is a secret and comes from the environment, not this file.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct DeliveryConfig {
    /// Destination chat ID.
    chat_id: String,

    /// Formatting mode for message text.
    #[builder(default = default_parse_mode())]
    #[serde(default = "default_parse_mode")]
    parse_mode: String,
}

fn default_parse_mode() -> String {
    "Markdown".to_string()
}

/// Main bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct BotConfig {
    /// Bot identity and topic catalog.
    #[builder(default)]
    #[serde(default)]
    bot: BotSection,

    /// Posting schedule.
    #[builder(default)]
    #[serde(default)]
    schedule: ScheduleConfig,

    /// Text generation settings.
    #[builder(default)]
    #[serde(default)]
    generation: GenerationConfig,

    /// Retry policy settings.
    #[builder(default)]
    #[serde(default)]
    retry: RetryConfig,

    /// Topic rotation settings.
    #[builder(default)]
    #[serde(default)]
    rotation: RotationConfig,

    /// Delivery settings.
    delivery: DeliveryConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to TOML file
    ///
    /// # Returns
    ///
    /// Parsed configuration on success.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - A configuration precondition is violated
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading bot config from file");

        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::FileIo {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;

        let config: BotConfig = toml::from_str(&contents)?;

        // Validate preconditions
        if config.bot.topics.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Invalid(
                "Topic catalog cannot be empty".to_string(),
            )));
        }

        if config.delivery.chat_id.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Invalid(
                "delivery.chat_id cannot be empty".to_string(),
            )));
        }

        if config.generation.max_tokens == 0 {
            return Err(ConfigError::new(ConfigErrorKind::Invalid(
                "generation.max_tokens must be positive".to_string(),
            )));
        }

        config.schedule.offset()?;
        config.schedule.times()?;

        tracing::info!(
            name = %config.bot.name,
            topics = config.bot.topics.len(),
            post_times = config.schedule.post_times.len(),
            model = %config.generation.model,
            "Loaded bot configuration"
        );

        Ok(config)
    }

    /// Validate configuration.
    ///
    /// Checks for common configuration issues.
    ///
    /// # Returns
    ///
    /// List of validation warnings (empty if valid).
    #[tracing::instrument(skip(self))]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.schedule.post_times.is_empty() {
            warnings.push("No scheduled post times, bot will only post at startup".to_string());
        }

        if self.rotation.max_topic_age_days == 0 {
            warnings.push(
                "max_topic_age_days is 0, topics may repeat on consecutive posts".to_string(),
            );
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            warnings.push(format!(
                "generation.temperature {} is outside the typical 0.0..=2.0 range",
                self.generation.temperature
            ));
        }

        if !self.generation.prompt_template.contains("{topic}") {
            warnings.push("Prompt template has no {topic} placeholder".to_string());
        }

        if self.retry.max_retries == 0 {
            warnings.push("retry.max_retries is 0, generation failures are not retried".to_string());
        }

        tracing::debug!(warnings = warnings.len(), "Configuration validated");
        warnings
    }

    /// Build the topic catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog would be empty, which `from_file`
    /// already rejects.
    pub fn catalog(&self) -> Result<TopicCatalog, RotationError> {
        TopicCatalog::new(self.bot.topics.iter().cloned())
    }

    /// Build the generation retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(
            self.retry.max_retries,
            Duration::from_millis(self.retry.initial_delay_ms),
        );
        match self.retry.attempt_timeout_secs {
            Some(secs) => policy.with_attempt_timeout(Duration::from_secs(secs)),
            None => policy,
        }
    }

    /// Build the prompt template.
    pub fn template(&self) -> PromptTemplate {
        PromptTemplate::new(&self.generation.prompt_template)
    }
}
