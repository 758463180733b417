//! Reusable retry policy.
//!
//! Replaces per-call-site retry loops with one configurable policy:
//! maximum attempts, a backoff function, and a caller-supplied
//! retryable-error predicate. The policy is synchronous and generic
//! over the caller's error type; it owns no error taxonomy of its own.
//!
//! # Example
//!
//! ```
//! use pmw_retry::RetryPolicy;
//!
//! let policy = RetryPolicy::without_delay(3);
//! let mut attempts = 0;
//! let result: Result<u32, &str> = policy.run(
//!     || {
//!         attempts += 1;
//!         if attempts < 3 { Err("transient") } else { Ok(attempts) }
//!     },
//!     |_| true,
//! );
//! assert_eq!(result, Ok(3));
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Backoff function applied between attempts.
///
/// Delays are computed from the policy's base delay and the 1-indexed
/// number of the attempt that just failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// No delay between attempts.
    None,
    /// Same delay before every retry.
    Constant,
    /// Delay grows linearly: base * attempt.
    Linear,
    /// Delay doubles each attempt: base * 2^(attempt-1).
    Exponential,
}

/// Retry policy: attempt budget plus backoff shape.
///
/// The default is the policy used for generation calls: three
/// attempts with linear backoff from a 500 ms base.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Base delay in milliseconds fed to the backoff function.
    pub base_delay_ms: u64,
    /// Backoff shape.
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            backoff: Backoff::Linear,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit settings.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay_ms: u64, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            backoff,
        }
    }

    /// Create a policy that retries without sleeping.
    #[must_use]
    pub fn without_delay(max_attempts: u32) -> Self {
        Self::new(max_attempts, 0, Backoff::None)
    }

    /// Delay to sleep after the given failed attempt (1-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let ms = match self.backoff {
            Backoff::None => 0,
            Backoff::Constant => self.base_delay_ms,
            Backoff::Linear => self.base_delay_ms.saturating_mul(u64::from(attempt)),
            Backoff::Exponential => self
                .base_delay_ms
                .saturating_mul(1_u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX)),
        };
        Duration::from_millis(ms)
    }

    /// Run an operation under this policy.
    ///
    /// The operation is attempted up to `max_attempts` times. A failure
    /// is retried only while `is_retryable` returns `true` for it and
    /// attempts remain; otherwise the error is returned to the caller
    /// unchanged. Sleeps between attempts according to the backoff.
    pub fn run<T, E, F, P>(&self, mut op: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max && is_retryable(&err) => {
                    let delay = self.delay_for_attempt(attempt);
                    tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying after failure");
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
