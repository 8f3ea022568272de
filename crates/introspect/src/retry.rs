//! Retry decorator for introspection providers.

use crate::{IntrospectionError, IntrospectionProvider, ResponseValue, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Base delay before the first retry; doubles on each attempt.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Wraps a provider and retries transport failures with exponential backoff.
///
/// Only [`IntrospectionError::Network`] is retried. A response that arrived,
/// even a plaintext error page, counts as a success and is returned as is.
#[derive(Debug, Clone)]
pub struct RetryingProvider<P> {
    inner: P,
    retries: u32,
    base_delay: Duration,
}

impl<P> RetryingProvider<P> {
    #[must_use]
    pub fn new(inner: P, retries: u32) -> Self {
        Self {
            inner,
            retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the delay before the first retry (1s by default).
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX))
    }
}

#[async_trait]
impl<P: IntrospectionProvider> IntrospectionProvider for RetryingProvider<P> {
    #[tracing::instrument(skip(self, query), fields(retries = self.retries))]
    async fn fetch(&self, query: &str) -> Result<ResponseValue> {
        let mut last_error = None;

        for attempt in 0..=self.retries {
            if attempt > 0 {
                let delay = self.delay_for(attempt);
                tracing::info!(
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.inner.fetch(query).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Request failed");
                    let retryable = e.is_retryable();
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| IntrospectionError::Network("No attempts made".to_string())))
    }
}
