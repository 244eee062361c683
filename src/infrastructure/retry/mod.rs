use crate::infrastructure::provider::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Bounded retry with exponential backoff for provider calls.
///
/// Only errors classified retryable by [`ProviderError::is_retryable`]
/// are retried; terminal errors return immediately. After the attempt
/// budget is spent the last observed error is returned and the caller
/// never retries further.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    /// Total attempt budget, including the first attempt.
    max_retries: u32,
    backoff_factor: u32,
    base_delay: Duration,
}

impl RetryExecutor {
    pub fn new(max_retries: u32, backoff_factor: u32, base_delay: Duration) -> Self {
        assert!(max_retries >= 1, "max_retries must be >= 1");
        Self {
            max_retries,
            backoff_factor,
            base_delay,
        }
    }

    /// Delay before retry `retry` (1-indexed): `backoff_factor^(retry-1) * base_delay`.
    fn delay_for_retry(&self, retry: u32) -> Duration {
        self.base_delay * self.backoff_factor.pow(retry.saturating_sub(1))
    }

    pub async fn execute<T, F, Fut>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut last_error: Option<ProviderError> = None;

        for attempt in 1..=self.max_retries {
            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(
                            "{}: succeeded on attempt {}/{}",
                            operation_name, attempt, self.max_retries
                        );
                    }
                    return Ok(result);
                }
                Err(e) if !e.is_retryable() => {
                    debug!(
                        "{}: terminal error on attempt {}, failing immediately: {}",
                        operation_name, attempt, e
                    );
                    return Err(e);
                }
                Err(e) => {
                    let remaining = self.max_retries - attempt;
                    if remaining > 0 {
                        let delay = self.delay_for_retry(attempt);
                        warn!(
                            "{}: attempt {}/{} failed ({}), retrying in {:?}",
                            operation_name, attempt, self.max_retries, e, delay
                        );
                        last_error = Some(e);
                        sleep(delay).await;
                    } else {
                        warn!(
                            "{}: all {} attempts failed, last error: {}",
                            operation_name, self.max_retries, e
                        );
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(last_error.expect("at least one attempt was made"))
    }
}
