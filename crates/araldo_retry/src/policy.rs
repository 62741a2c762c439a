//! Retry policy and executor.

use crate::DoublingBackoff;
use derive_getters::Getters;
use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tokio_retry2::{Retry, RetryError};

/// Retry policy for a fallible async operation.
///
/// Total attempts = `max_retries + 1`. Delays between attempts start at
/// `initial_delay` and double after every failure. With the default
/// configuration (3 retries, 1000 ms) the waits are 1 s, 2 s, and 4 s.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    max_retries: usize,
    /// Delay before the first retry; doubles after every failed attempt.
    initial_delay: Duration,
    /// Optional deadline applied to each individual attempt.
    attempt_timeout: Option<Duration>,
}

impl RetryPolicy {
    /// Create a policy with no per-attempt deadline.
    pub fn new(max_retries: usize, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            attempt_timeout: None,
        }
    }

    /// Apply a deadline to each attempt.
    ///
    /// Deadline expiry converts into the operation's error type via
    /// `From<Elapsed>` and is retried like any other failure.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Execute an operation under this policy.
    ///
    /// The operation is invoked once, then retried with doubling backoff
    /// until it succeeds or the retry budget is spent. Backoff waits suspend
    /// only the calling task. Every failure is retried; the executor does
    /// not discriminate between error kinds.
    ///
    /// # Returns
    ///
    /// The operation's success value.
    ///
    /// # Errors
    ///
    /// After retries are exhausted, the final failure propagates unchanged.
    pub async fn run<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display + From<Elapsed>,
    {
        let strategy = DoublingBackoff::from_initial(self.initial_delay).take(self.max_retries);
        let max_retries = self.max_retries;
        let attempt_timeout = self.attempt_timeout;
        let mut attempt = 0usize;

        Retry::spawn(strategy, move || {
            attempt += 1;
            let current = attempt;
            let fut = operation();
            async move {
                let result = match attempt_timeout {
                    Some(budget) => match tokio::time::timeout(budget, fut).await {
                        Ok(inner) => inner,
                        Err(elapsed) => Err(E::from(elapsed)),
                    },
                    None => fut.await,
                };

                match result {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        let remaining = max_retries.saturating_sub(current - 1);
                        if remaining > 0 {
                            tracing::warn!(
                                error = %err,
                                attempt = current,
                                remaining,
                                "Operation failed, will retry after backoff"
                            );
                        } else {
                            tracing::warn!(
                                error = %err,
                                attempt = current,
                                "Operation failed on final attempt"
                            );
                        }
                        Err(RetryError::Transient {
                            err,
                            retry_after: None,
                        })
                    }
                }
            }
        })
        .await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}
