//! Telegram delivery sink.
//!
//! Implements [`araldo_core::DeliverySink`] over the Telegram Bot API
//! `sendMessage` method, plus a no-op sink for dry runs and tests.
//! Delivery is fire-and-forget from the pipeline's point of view: failures
//! are surfaced once and never retried.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod noop;
mod sink;
mod wire;

pub use noop::NoOpSink;
pub use sink::{MAX_MESSAGE_LENGTH, TELEGRAM_API_BASE, TelegramSink};
pub use wire::{SendMessageRequest, SendMessageResponse, SentMessage};
