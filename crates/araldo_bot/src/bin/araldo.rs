//! Araldo - scheduled topical posting bot.
//!
//! Twice a day (and once at startup) the bot picks a web-technology topic
//! that has not been posted about within the last week, generates a short
//! Markdown post about it, and delivers the post to a Telegram chat.

use araldo_bot::{BotConfig, PostDaemon, PostPipeline};
use araldo_core::DeliverySink;
use araldo_error::{ConfigError, ConfigErrorKind};
use araldo_models::OpenAiClient;
use araldo_rotation::{JsonUsageStore, TopicSelector};
use araldo_telegram::{NoOpSink, TelegramSink};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(name = "araldo")]
#[command(about = "Araldo - scheduled topical posting bot")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "araldo.toml")]
    config: PathBuf,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: String,

    /// Telegram bot token (unused with --dry-run)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    telegram_token: Option<String>,

    /// Dry run mode (log posts instead of delivering them)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Starting araldo");
    info!(config_file = ?args.config, "Loading configuration");

    let config = BotConfig::from_file(&args.config)?;
    for warning in config.validate() {
        warn!(%warning, "Configuration warning");
    }

    let store = Arc::new(JsonUsageStore::new(config.rotation().store_path()));
    let selector = TopicSelector::new(
        store,
        config.catalog()?,
        *config.rotation().max_topic_age_days(),
    );

    let generator = Arc::new(
        OpenAiClient::new(&args.openai_api_key, config.generation().model())
            .with_api_base(config.generation().api_base())
            .with_max_tokens(*config.generation().max_tokens())
            .with_temperature(*config.generation().temperature())
            .with_system_prompt(config.generation().system_prompt()),
    );

    let sink: Arc<dyn DeliverySink> = if args.dry_run {
        info!("Dry run mode, posts will not be delivered");
        Arc::new(NoOpSink::new())
    } else {
        let token = args.telegram_token.ok_or_else(|| {
            ConfigError::new(ConfigErrorKind::MissingEnv("TELEGRAM_BOT_TOKEN".to_string()))
        })?;
        Arc::new(
            TelegramSink::new(token, config.delivery().chat_id())?
                .with_parse_mode(config.delivery().parse_mode()),
        )
    };

    let pipeline = Arc::new(
        PostPipeline::builder()
            .selector(selector)
            .generator(generator)
            .sink(sink)
            .retry(config.retry_policy())
            .template(config.template())
            .build()?,
    );

    // Post once immediately at startup, then hand off to the daemon.
    pipeline.run_cycle().await;

    let daemon = PostDaemon::new(
        Arc::clone(&pipeline),
        config.schedule().offset()?,
        &config.schedule().times()?,
    );
    let handle = daemon.spawn();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping daemon");
    handle.abort();

    Ok(())
}
