use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use collector_core::{RetryDecision, RetryPolicy};
use collector_logging::{collector_debug, collector_error, collector_info, collector_warn};

use crate::{ApiError, FetchError};

/// Waits between attempts. Swapped out in tests to avoid real delays.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Runs remote calls under a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryingFetcher {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryingFetcher {
    pub fn new(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Run `call` until it succeeds, fails with a terminal status, or the policy
    /// runs out of attempts. `operation` names the call in log lines and errors.
    pub async fn call<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match call().await {
                Ok(value) => {
                    if attempt > 1 {
                        collector_info!("{operation} succeeded on attempt {attempt}/{max_attempts}");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            collector_warn!("{operation} failed (attempt {attempt}/{max_attempts}): {err}");
            match self.policy.decide(attempt, err.class()) {
                RetryDecision::RetryAfter(delay) => {
                    collector_debug!("{operation}: retrying in {delay:?}");
                    self.sleeper.sleep(delay).await;
                }
                RetryDecision::Fail => {
                    collector_error!("{operation} gave up after {attempt} attempt(s): {err}");
                    return Err(FetchError {
                        operation: operation.to_string(),
                        attempts: attempt,
                        cause: err,
                    });
                }
            }
        }
    }
}
