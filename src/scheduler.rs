//! Poll/backoff loop gating execution on cluster health.

use crate::config::GuardConfig;
use crate::error::Error;
use crate::evaluator::{EvaluationResult, StatsEvaluator};
use crate::provider::StatsProvider;
use rand::Rng;
use std::time::Duration;

/// Drives fetch-and-evaluate polls until the cluster is healthy or the retry
/// budget runs out.
///
/// One scheduler serves exactly one guarded invocation: the attempt counter
/// lives on the stack of [`await_healthy`](RetryScheduler::await_healthy) and
/// dies with it, so concurrent invocations share nothing.
pub struct RetryScheduler<'a> {
    config: &'a GuardConfig,
    provider: &'a dyn StatsProvider,
    evaluator: &'a StatsEvaluator,
}

impl<'a> RetryScheduler<'a> {
    pub fn new(
        config: &'a GuardConfig,
        provider: &'a dyn StatsProvider,
        evaluator: &'a StatsEvaluator,
    ) -> Self {
        Self {
            config,
            provider,
            evaluator,
        }
    }

    /// Poll until the evaluator passes.
    ///
    /// A provider failure propagates immediately and does not consume a retry
    /// attempt. After `max_retries` backoff sleeps with the cluster still
    /// unhealthy, returns [`Error::MaxRetriesExceeded`]. Sleeping suspends
    /// only the current task.
    pub async fn await_healthy(&self) -> crate::Result<()> {
        let mut attempt: u32 = 0;
        loop {
            let stats = self.provider.cluster_stats().await?;

            match self.evaluator.evaluate(&stats, self.config) {
                EvaluationResult::Healthy => return Ok(()),
                EvaluationResult::Unhealthy(violation) => {
                    if attempt == self.config.max_retries {
                        return Err(Error::MaxRetriesExceeded {
                            max_retries: self.config.max_retries,
                        });
                    }

                    let delay = backoff_delay(self.config.retry_backoff, attempt);
                    tracing::debug!(
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        violation = %violation,
                        "cluster unhealthy, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Delay before the next poll: `base * 2^attempt` plus up to one second of
/// uniform jitter. `attempt` is 0-indexed; the shift saturates instead of
/// overflowing. There is no upper cap on the delay.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    let exponential = base.saturating_mul(factor);
    let jitter = rand::rng().random_range(0.0..1.0);
    exponential.saturating_add(Duration::from_secs_f64(jitter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_within_jitter_window() {
        let base = Duration::from_millis(100);
        for attempt in 0..4u32 {
            let floor = base * 2u32.pow(attempt);
            let ceiling = floor + Duration::from_secs(1);
            for _ in 0..100 {
                let delay = backoff_delay(base, attempt);
                assert!(delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
                assert!(delay < ceiling, "attempt {attempt}: {delay:?} >= {ceiling:?}");
            }
        }
    }

    #[test]
    fn test_backoff_delay_doubles_per_attempt() {
        let base = Duration::from_secs(1);
        // Strip jitter bounds: attempt 3 floor must be 8x the attempt 0 floor.
        let first = backoff_delay(base, 0);
        let fourth = backoff_delay(base, 3);
        assert!(first >= Duration::from_secs(1) && first < Duration::from_secs(2));
        assert!(fourth >= Duration::from_secs(8) && fourth < Duration::from_secs(9));
    }

    #[test]
    fn test_backoff_delay_saturates_on_large_attempts() {
        // Shift width exceeded: factor saturates to u32::MAX without panicking.
        let delay = backoff_delay(Duration::from_secs(1), 64);
        assert!(delay >= Duration::from_secs(u32::MAX as u64));
    }
}
