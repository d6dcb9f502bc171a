//! Retry wrapper for calls to the remote source.
//!
//! Every remote round trip goes through [`RetryPolicy::run`]. Backoff is
//! linear (`base_delay * attempt_number`), with no jitter and no circuit
//! breaker; the remote source is a managed API with its own rate limiting.
//! Exhaustion propagates the last error; callers treat it as a hard failure
//! for that call only, never process-fatal.

use std::future::Future;
use std::time::Duration;

use crate::error::Error;

/// Bounded linear-backoff retry policy.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Attempts before the last error propagates.
    pub max_attempts: u32,
    /// Wait after the first failure; attempt `n` waits `base_delay * n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Executes `operation`, retrying on failure until it succeeds or the
    /// attempt budget is exhausted.
    ///
    /// # Arguments
    /// - `description`: what is being fetched, for logging (e.g. "Countries table")
    /// - `operation`: async function performing one remote round trip
    pub async fn run<T, F, Fut>(&self, description: &str, operation: F) -> Result<T, Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut attempt = 1;

        loop {
            tracing::debug!(
                "Fetching {} (attempt {}/{})",
                description,
                attempt,
                self.max_attempts
            );

            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt >= self.max_attempts {
                        tracing::error!(
                            "Max attempts ({}) exceeded for {}: {:?}",
                            self.max_attempts,
                            description,
                            e
                        );
                        return Err(e);
                    }

                    let backoff = self.base_delay * attempt;
                    tracing::warn!(
                        "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                        description,
                        attempt,
                        self.max_attempts,
                        backoff,
                        e
                    );

                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Runs `operation` under the default policy (3 attempts, 1s base delay).
pub async fn fetch_with_retry<T, F, Fut>(description: &str, operation: F) -> Result<T, Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    RetryPolicy::default().run(description, operation).await
}
