// Bounded retry with exponential backoff for the fetcher's API call

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::FetchError;

/// Attempt budget and backoff curve. No jitter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(8000),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (1-based): base * 2^(attempt-1), capped
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error,
/// or the attempt budget is spent. The final attempt's error is returned on exhaustion.
/// `op` receives the 1-based attempt number.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!("Attempt {}/{} failed: {}", attempt, attempts, err);
                if !err.is_retryable() {
                    return Err(err);
                }
            }
        }

        tokio::time::sleep(policy.backoff(attempt)).await;
    }

    op(attempts).await.map_err(|err| {
        warn!("Attempt {}/{} failed: {}", attempts, attempts, err);
        err
    })
}
