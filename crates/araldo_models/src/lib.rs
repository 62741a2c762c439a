//! OpenAI-compatible text generation backend.
//!
//! Implements [`araldo_core::TextGenerator`] against the chat-completions
//! endpoint. Retry on transient failure is the caller's concern; this crate
//! surfaces each failure once, with a kind suitable for diagnostics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod wire;

pub use client::{OPENAI_API_BASE, OpenAiClient};
pub use wire::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
