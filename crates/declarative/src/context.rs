//! Cancellation and deadline propagation
//!
//! Every operation on a resource instance carries an [`OperationContext`].
//! It is checked before each remote call and between retry attempts, and
//! its remaining time bounds the timeout of individual requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Longest single sleep slice before the context is re-checked
const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Why an operation stopped before completing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interruption {
    #[error("operation cancelled")]
    Cancelled,

    #[error("operation deadline exceeded")]
    DeadlineExceeded,
}

/// Shared cancellation flag
///
/// Clones observe the same flag, so one token can be handed to several
/// parallel operations and cancelled once.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Cancellation token plus optional deadline for one operation
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Context with no deadline and a fresh token
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail if the operation was cancelled or ran out of time
    pub fn check(&self) -> Result<(), Interruption> {
        if self.token.is_cancelled() {
            return Err(Interruption::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Interruption::DeadlineExceeded);
        }
        Ok(())
    }

    /// Time left before the deadline, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Sleep for `duration`, waking early on cancellation or deadline
    pub fn sleep(&self, duration: Duration) -> Result<(), Interruption> {
        let wake = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= wake {
                return Ok(());
            }
            let mut slice = (wake - now).min(SLEEP_SLICE);
            if let Some(left) = self.remaining() {
                slice = slice.min(left);
            }
            thread::sleep(slice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_live() {
        let ctx = OperationContext::new();
        assert!(ctx.check().is_ok());
        assert!(ctx.remaining().is_none());
    }

    #[test]
    fn test_cancelled_token_is_shared() {
        let token = CancellationToken::new();
        let ctx = OperationContext::new().with_token(token.clone());
        token.cancel();
        assert_eq!(ctx.check(), Err(Interruption::Cancelled));
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = OperationContext::new().with_deadline(Instant::now());
        assert_eq!(ctx.check(), Err(Interruption::DeadlineExceeded));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_sleep_stops_at_deadline() {
        let ctx = OperationContext::with_timeout(Duration::from_millis(20));
        let start = Instant::now();
        let result = ctx.sleep(Duration::from_secs(5));
        assert_eq!(result, Err(Interruption::DeadlineExceeded));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_sleep_completes() {
        let ctx = OperationContext::new();
        assert!(ctx.sleep(Duration::from_millis(5)).is_ok());
    }
}
