//! Configuration for the resolution pipeline.
//!
//! # Example: defaults
//!
//! ```
//! use trongaze::ResolverConfig;
//!
//! // 5-minute cache TTL, 100 cached addresses, 3 fetch attempts
//! let config = ResolverConfig::default();
//! ```
//!
//! # Example: custom configuration
//!
//! ```
//! use trongaze::{ResolverConfig, fetch::RetryConfig};
//! use std::time::Duration;
//!
//! let config = ResolverConfig::builder()
//!     .cache_ttl(Duration::from_secs(60))
//!     .cache_capacity(500)
//!     .retry(RetryConfig::builder().max_attempts(5).build())
//!     .build();
//! ```

use std::time::Duration;

use crate::fetch::RetryConfig;

pub mod constants;

use constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};

/// Configuration for a [`Resolver`](crate::resolver::Resolver).
///
/// Controls the cache freshness window, the cache capacity bound, and the
/// upstream retry policy. Use [`ResolverConfigBuilder`] for a fluent API.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Time-to-live for cached attribute triples.
    pub cache_ttl: Duration,
    /// Maximum number of cached addresses.
    pub cache_capacity: usize,
    /// Retry policy for upstream fetches.
    pub retry: RetryConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            retry: RetryConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Creates a builder seeded with the defaults.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }
}

/// Builder for a [`ResolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    /// Sets the cache time-to-live.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    /// Sets the cache capacity bound.
    ///
    /// Clamped to at least 1.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity.max(1);
        self
    }

    /// Sets the upstream retry policy.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Builds the configured [`ResolverConfig`].
    pub fn build(self) -> ResolverConfig {
        self.config
    }
}
