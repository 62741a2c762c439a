//! Telegram sink implementation.

use crate::{SendMessageRequest, SendMessageResponse};
use araldo_core::{DeliverySink, MessageId};
use araldo_error::{DeliveryError, DeliveryErrorKind};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// Default API base for the Telegram Bot API.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram's maximum message text length.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

const DEFAULT_PARSE_MODE: &str = "Markdown";

/// Telegram Bot API sink.
///
/// Sends generated posts to a single configured chat.
pub struct TelegramSink {
    client: Client,
    token: String,
    chat_id: String,
    api_base: String,
    parse_mode: String,
}

impl std::fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSink")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("parse_mode", &self.parse_mode)
            .finish_non_exhaustive()
    }
}

impl TelegramSink {
    /// Create a new Telegram sink.
    ///
    /// # Arguments
    ///
    /// * `token` - Bot token
    /// * `chat_id` - Destination chat ID
    ///
    /// # Errors
    ///
    /// Returns error if token or chat_id are empty.
    #[instrument(skip(token, chat_id))]
    pub fn new(
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, DeliveryError> {
        let token = token.into();
        let chat_id = chat_id.into();

        if token.is_empty() {
            return Err(DeliveryError::new(DeliveryErrorKind::InvalidConfiguration(
                "Telegram bot token cannot be empty".to_string(),
            )));
        }

        if chat_id.is_empty() {
            return Err(DeliveryError::new(DeliveryErrorKind::InvalidConfiguration(
                "Telegram chat_id cannot be empty".to_string(),
            )));
        }

        debug!("Created Telegram sink");

        Ok(Self {
            client: Client::new(),
            token,
            chat_id,
            api_base: TELEGRAM_API_BASE.to_string(),
            parse_mode: DEFAULT_PARSE_MODE.to_string(),
        })
    }

    /// Override the API base URL (test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the parse mode ("Markdown", "MarkdownV2", "HTML").
    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = parse_mode.into();
        self
    }

    /// The configured destination chat ID.
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Validate text against Telegram limits.
    fn validate_text(&self, text: &str) -> Result<(), DeliveryError> {
        if text.is_empty() {
            return Err(DeliveryError::new(DeliveryErrorKind::ValidationFailed(
                "Message text cannot be empty".to_string(),
            )));
        }

        if text.len() > MAX_MESSAGE_LENGTH {
            return Err(DeliveryError::new(DeliveryErrorKind::ValidationFailed(
                format!(
                    "Text exceeds Telegram limit of {} characters ({})",
                    MAX_MESSAGE_LENGTH,
                    text.len()
                ),
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl DeliverySink for TelegramSink {
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id, chars = text.len()))]
    async fn send(&self, text: &str) -> Result<MessageId, DeliveryError> {
        debug!("Sending message to Telegram");

        self.validate_text(text)?;

        let request = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
            parse_mode: self.parse_mode.clone(),
        };

        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send Telegram request");
                DeliveryError::new(DeliveryErrorKind::Http(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let description = serde_json::from_str::<SendMessageResponse>(&body)
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(body);
            error!(status = %status, description = %description, "Telegram API returned error");
            return Err(DeliveryError::new(DeliveryErrorKind::Api {
                status: status.as_u16(),
                description,
            }));
        }

        let envelope: SendMessageResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Telegram response");
            DeliveryError::new(DeliveryErrorKind::Parse(e.to_string()))
        })?;

        if !envelope.ok {
            return Err(DeliveryError::new(DeliveryErrorKind::Api {
                status: envelope.error_code.unwrap_or_default(),
                description: envelope.description.unwrap_or_default(),
            }));
        }

        let sent = envelope.result.ok_or_else(|| {
            DeliveryError::new(DeliveryErrorKind::Parse(
                "Response missing result for ok call".to_string(),
            ))
        })?;

        info!(message_id = sent.message_id, "Message delivered");
        Ok(MessageId(sent.message_id.to_string()))
    }

    fn sink_name(&self) -> &'static str {
        "telegram"
    }
}
