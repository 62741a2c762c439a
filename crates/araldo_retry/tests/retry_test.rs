//! Tests for the retry executor.

use araldo_retry::RetryPolicy;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
enum TestError {
    #[display("simulated failure")]
    Simulated,
    #[display("attempt deadline expired")]
    Deadline,
}

impl From<tokio::time::error::Elapsed> for TestError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Deadline
    }
}

#[tokio::test]
async fn first_attempt_success_skips_backoff() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let counter = Arc::clone(&attempts);
    let result: Result<&str, TestError> = policy
        .run(|| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("post text")
            }
        })
        .await;

    assert_eq!(result, Ok("post text"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn backoff_doubles_between_attempts() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));
    let start = Instant::now();

    // Fails exactly twice, then succeeds on the third attempt.
    let counter = Arc::clone(&attempts);
    let result: Result<&str, TestError> = policy
        .run(|| {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(TestError::Simulated)
                } else {
                    Ok("post text")
                }
            }
        })
        .await;

    assert_eq!(result, Ok("post text"));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);

    // Waited 1000 ms then 2000 ms between the three attempts.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(3000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(3500), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn exhaustion_propagates_original_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));
    let start = Instant::now();

    let counter = Arc::clone(&attempts);
    let result: Result<(), TestError> = policy
        .run(|| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Simulated)
            }
        })
        .await;

    assert_eq!(result, Err(TestError::Simulated));
    assert_eq!(attempts.load(Ordering::SeqCst), 4);

    // 1 s + 2 s + 4 s of backoff across four attempts.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(7000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(7500), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn stuck_attempt_hits_deadline_and_retries() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let policy =
        RetryPolicy::new(3, Duration::from_millis(1000)).with_attempt_timeout(Duration::from_millis(50));

    // First attempt hangs past the deadline; second returns promptly.
    let counter = Arc::clone(&attempts);
    let result: Result<&str, TestError> = policy
        .run(|| {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                Ok("post text")
            }
        })
        .await;

    assert_eq!(result, Ok("post text"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn deadline_expiry_exhausts_like_any_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let policy =
        RetryPolicy::new(1, Duration::from_millis(1000)).with_attempt_timeout(Duration::from_millis(50));

    let counter = Arc::clone(&attempts);
    let result: Result<(), TestError> = policy
        .run(|| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        })
        .await;

    assert_eq!(result, Err(TestError::Deadline));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
