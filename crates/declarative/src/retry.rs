//! Retry logic with exponential backoff for transient errors.

use crate::context::{Interruption, OperationContext};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Classifies errors as worth retrying
pub trait Retryable {
    /// Whether the same call may succeed if repeated later
    fn is_retryable(&self) -> bool;
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_factor: f64,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings.
    pub fn new(max_attempts: u32, base_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff_factor,
            ..Default::default()
        }
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    #[allow(clippy::cast_possible_wrap)]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_secs_f64() * self.backoff_factor.powi(attempt as i32);
        let capped = delay.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }
}

/// Outcome of a failed retried operation
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The operation failed with an error that is not worth retrying
    #[error("{0}")]
    Fatal(E),

    /// Every attempt failed with a retryable error
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: E,
    },

    /// The context was cancelled or expired between attempts
    #[error("{reason} after {attempts} attempts")]
    Interrupted {
        attempts: u32,
        reason: Interruption,
    },
}

/// Callback trait for retry progress notifications.
pub trait RetryCallback {
    /// Called when an operation is being retried.
    ///
    /// # Arguments
    /// * `attempt` - Attempt that just failed (1-indexed)
    /// * `max_attempts` - Maximum number of attempts
    /// * `error` - The error that triggered the retry
    /// * `delay` - Time until next attempt
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &dyn fmt::Display, delay: Duration);
}

/// Callback that logs retries at warn level.
pub struct LogCallback;

impl RetryCallback for LogCallback {
    fn on_retry(&self, attempt: u32, max_attempts: u32, error: &dyn fmt::Display, delay: Duration) {
        log::warn!(
            "Attempt {attempt}/{max_attempts} failed: {error}. Retrying in {}ms...",
            delay.as_millis()
        );
    }
}

/// Execute an operation with retry logic.
///
/// Retries the operation while it returns a [`Retryable`] error, using
/// exponential backoff between attempts. The context is checked before
/// every attempt and the backoff sleep wakes early when it is cancelled or
/// its deadline passes, so an interrupted operation reports
/// [`RetryError::Interrupted`] rather than exhausting its attempts.
///
/// The operation is called at most `max_attempts` times (at least once).
pub fn with_retry<T, E, F>(
    ctx: &OperationContext,
    config: &RetryConfig,
    callback: Option<&dyn RetryCallback>,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: Retryable + fmt::Display,
    F: FnMut() -> Result<T, E>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if let Err(reason) = ctx.check() {
            return Err(RetryError::Interrupted {
                attempts: attempt,
                reason,
            });
        }

        let err = match operation() {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        attempt += 1;

        if !err.is_retryable() {
            return Err(RetryError::Fatal(err));
        }
        if attempt >= max_attempts {
            return Err(RetryError::Exhausted {
                attempts: attempt,
                last: err,
            });
        }

        let delay = config.delay_for_attempt(attempt - 1);
        if let Some(cb) = callback {
            cb.on_retry(attempt, max_attempts, &err, delay);
        }

        if let Err(reason) = ctx.sleep(delay) {
            return Err(RetryError::Interrupted {
                attempts: attempt,
                reason,
            });
        }
    }
}
