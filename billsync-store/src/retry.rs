//! Bounded retry with exponential backoff for idempotent remote calls.
//!
//! Only `find` and `patch` go through here. `create` must never be retried:
//! the store assigns identity on insert and there is no idempotency key, so a
//! retried create duplicates the record.

use std::time::Duration;

use crate::error::RemoteError;

/// Retry budget for one logical operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first (1 = no retries).
    pub max_attempts: u32,
    /// Sleep before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    fn delay_before_attempt(&self, attempt: u32) -> Duration {
        // attempt is 2-based here: the sleep preceding the Nth try.
        self.base_delay * 2u32.saturating_pow(attempt - 2)
    }
}

/// Run `call` under `policy`, retrying transient failures.
///
/// Final (non-transient) errors propagate immediately; the last transient
/// error propagates once the budget is spent.
pub fn with_retry<T>(
    policy: RetryPolicy,
    operation: &str,
    mut call: impl FnMut() -> Result<T, RemoteError>,
) -> Result<T, RemoteError> {
    let mut attempt = 1;
    loop {
        match call() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                attempt += 1;
                let delay = policy.delay_before_attempt(attempt);
                tracing::warn!(
                    "{operation} failed transiently ({err}); retry {}/{} after {delay:?}",
                    attempt,
                    policy.max_attempts
                );
                std::thread::sleep(delay);
            }
            Err(err) => return Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
