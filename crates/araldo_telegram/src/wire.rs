//! Telegram Bot API wire types.

use serde::{Deserialize, Serialize};

/// Request body for `sendMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessageRequest {
    /// Destination chat identifier.
    pub chat_id: String,
    /// Message text.
    pub text: String,
    /// Formatting mode for the text.
    pub parse_mode: String,
}

/// The delivered message, as echoed back by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentMessage {
    /// Telegram message identifier.
    pub message_id: i64,
}

/// Response envelope for Bot API calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessageResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Present on success.
    #[serde(default)]
    pub result: Option<SentMessage>,
    /// Present on failure.
    #[serde(default)]
    pub error_code: Option<u16>,
    /// Present on failure.
    #[serde(default)]
    pub description: Option<String>,
}
