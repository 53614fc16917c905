//! Retry policy with exponential backoff.
//!
//! The policy is a pure function of the attempt number and the class of the
//! failure; the engine's fetcher performs the actual waiting.

use std::time::Duration;

/// HTTP statuses the remote uses for rate limiting, overload or unavailability.
pub const TRANSIENT_STATUSES: [u16; 4] = [403, 429, 500, 503];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Rate limiting or server overload, worth another attempt.
    Transient,
    /// Definitive answer from the remote (bad request, not found, ...).
    Terminal,
    /// Anything else: transport failures, undecodable bodies.
    Unexpected,
}

impl FailureClass {
    pub fn from_status(status: u16) -> Self {
        if TRANSIENT_STATUSES.contains(&status) {
            FailureClass::Transient
        } else {
            FailureClass::Terminal
        }
    }

    pub fn is_retryable(self) -> bool {
        !matches!(self, FailureClass::Terminal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter(Duration),
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubled after each further failure.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// `initial_delay * 2^(attempt - 1)` for the 1-based `attempt` that just failed.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }

    /// Decide what happens after the 1-based `attempt` failed with `class`.
    pub fn decide(&self, attempt: u32, class: FailureClass) -> RetryDecision {
        if !class.is_retryable() || attempt >= self.max_attempts {
            RetryDecision::Fail
        } else {
            RetryDecision::RetryAfter(self.backoff(attempt))
        }
    }
}
