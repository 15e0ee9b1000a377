//! Bounded-attempt retry with exponential backoff for account fetches.
//!
//! The retry policy is an explicit loop returning a tagged result rather
//! than an error-propagation chain: transient failures are retried up to the
//! attempt budget with exponential backoff, terminal failures short-circuit
//! on the first attempt, and exhaustion is reported as
//! [`FetchError::RetriesExhausted`] for the pipeline to surface as a
//! service-unavailable condition.

use std::time::Duration;

use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, warn};

use super::AccountSource;
use crate::address::TronAddress;
use crate::errors::FetchError;
use crate::types::AccountAttributes;

/// Default total attempts, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default base delay for exponential backoff (1 second).
const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
/// Default maximum delay between attempts (10 seconds).
const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// Configuration for retry behavior.
///
/// The backoff formula is:
///
/// ```text
/// delay = min(base_delay * 2^attempt, max_delay)
/// ```
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum total attempts, including the first request.
    pub max_attempts: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between attempts.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    /// Creates a builder for customizing retry configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use trongaze::fetch::RetryConfig;
    /// use std::time::Duration;
    ///
    /// let config = RetryConfig::builder()
    ///     .max_attempts(5)
    ///     .base_delay(Duration::from_millis(200))
    ///     .build();
    /// assert_eq!(config.max_attempts, 5);
    /// ```
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }
}

/// Builder for a [`RetryConfig`].
#[derive(Clone, Debug, Default)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum total attempts (including the first).
    ///
    /// Clamped to at least 1.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the base delay for exponential backoff.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Sets the maximum delay between attempts.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.max_delay = delay;
        self
    }

    /// Builds the configured [`RetryConfig`].
    pub fn build(self) -> RetryConfig {
        self.config
    }
}

/// Wraps an [`AccountSource`] with bounded retries.
///
/// One `fetch` call makes at most `max_attempts` tries against the source.
/// Every attempt is logged with the address, attempt number, and cause, so
/// a failure can be diagnosed without re-issuing the call.
#[derive(Debug)]
pub struct RetryingFetcher<S> {
    source: S,
    config: RetryConfig,
}

impl<S: AccountSource> RetryingFetcher<S> {
    /// Wraps `source` with the given retry configuration.
    pub fn new(source: S, config: RetryConfig) -> Self {
        Self { source, config }
    }

    /// Fetches account attributes, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Terminal`] immediately on a non-retryable rejection
    ///   (one attempt, no backoff)
    /// - [`FetchError::RetriesExhausted`] once `max_attempts` tries have all
    ///   failed with transient causes
    pub async fn fetch(&self, address: &TronAddress) -> Result<AccountAttributes, FetchError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;

            match self.source.fetch_account(address).await {
                Ok(attributes) => {
                    if attributes.balance < BigDecimal::zero() {
                        return Err(FetchError::terminal(
                            "get_account",
                            format!(
                                "provider reported negative balance {} for {address}",
                                attributes.balance
                            ),
                        ));
                    }
                    if attempt > 1 {
                        debug!(address = %address, attempt, "Fetch succeeded after retry");
                    }
                    return Ok(attributes);
                }
                Err(error) if !error.is_retryable() => {
                    debug!(
                        address = %address,
                        error = %error,
                        "Non-retryable upstream error, not retrying"
                    );
                    return Err(error);
                }
                Err(error) => {
                    if attempt >= self.config.max_attempts {
                        warn!(
                            address = %address,
                            attempts = attempt,
                            error = %error,
                            "Retry budget exhausted"
                        );
                        return Err(FetchError::retries_exhausted(
                            address.as_str(),
                            attempt,
                            error,
                        ));
                    }

                    let delay = calculate_backoff(attempt - 1, &self.config);
                    warn!(
                        address = %address,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "Transient upstream failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Calculates the backoff duration for a given (zero-based) attempt.
///
/// Uses exponential backoff: `min(base_delay * 2^attempt, max_delay)`.
fn calculate_backoff(attempt: u32, config: &RetryConfig) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt);
    let delay_ms = config
        .base_delay
        .as_millis()
        .saturating_mul(multiplier as u128);
    let capped_delay_ms = delay_ms.min(config.max_delay.as_millis()) as u64;
    Duration::from_millis(capped_delay_ms)
}
