use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Attempts per target when retrying is enabled
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Pause between two attempts at the same target
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Bounded retry with a fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    max_attempts: u32,
    /// Fixed delay between attempts
    delay: Duration,
}

/// Returned when every attempt failed
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl RetryPolicy {
    /// Five attempts, two seconds apart
    pub const fn enabled() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// A single attempt
    pub const fn disabled() -> Self {
        Self {
            max_attempts: 1,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Policy for the `--no-retry` flag
    pub const fn from_flag(no_retry: bool) -> Self {
        if no_retry {
            Self::disabled()
        } else {
            Self::enabled()
        }
    }

    /// Override the attempt bound (at least one attempt is always made)
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Override the pause between attempts
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` until it succeeds or the attempt bound is reached
    ///
    /// The closure receives the 1-based attempt number. Each failure is
    /// logged at warn level; the policy sleeps between attempts but not
    /// after the last one.
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "attempt failed"
                    );

                    if attempt >= self.max_attempts {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: err,
                        });
                    }

                    sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::enabled()
    }
}
