//! Error types for the araldo posting bot.
//!
//! This crate provides the foundation error types used throughout the araldo
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use araldo_error::{AraldoResult, GenerationError, GenerationErrorKind};
//!
//! fn fetch_post() -> AraldoResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::Http(
//!         "connection refused".to_string(),
//!     )))?
//! }
//!
//! match fetch_post() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod delivery;
mod error;
mod generation;
mod rotation;
mod store;

pub use config::{ConfigError, ConfigErrorKind};
pub use delivery::{DeliveryError, DeliveryErrorKind};
pub use error::{AraldoError, AraldoErrorKind, AraldoResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use rotation::{RotationError, RotationErrorKind};
pub use store::{StoreError, StoreErrorKind};
