//! Bounded exponential-backoff retry for fallible async operations.
//!
//! This crate wraps an unreliable remote call in a retry loop: the operation
//! runs once, and on failure is retried after a doubling delay until the
//! attempt budget is spent, at which point the final failure propagates to
//! the caller unchanged. All failures are treated uniformly; there is no
//! error-kind discrimination for retry purposes.
//!
//! Each attempt may optionally carry a deadline; deadline expiry converts
//! into the operation's error type and is retried like any other failure.
//!
//! # Example
//!
//! ```no_run
//! use araldo_retry::RetryPolicy;
//! use std::time::Duration;
//!
//! # #[derive(Debug)] struct MyError;
//! # impl std::fmt::Display for MyError {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "err") }
//! # }
//! # impl From<tokio::time::error::Elapsed> for MyError {
//! #     fn from(_: tokio::time::error::Elapsed) -> Self { MyError }
//! # }
//! # async fn remote_call() -> Result<String, MyError> { Ok("ok".into()) }
//! # async fn example() -> Result<(), MyError> {
//! let policy = RetryPolicy::new(3, Duration::from_millis(1000));
//! let text = policy.run(|| remote_call()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backoff;
mod policy;

pub use backoff::DoublingBackoff;
pub use policy::RetryPolicy;
