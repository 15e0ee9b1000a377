//! The resolution pipeline.
//!
//! [`Resolver`] orchestrates one lookup end to end:
//!
//! ```text
//! Validating -> CacheCheck -> (hit)  -> Persisting -> Respond
//!                          -> (miss) -> Fetching -> Persisting
//!                                       -> CachePopulate -> Respond
//! ```
//!
//! Any step may fail terminally; the error taxonomy maps each failure to a
//! distinct client-facing class (see [`ResolveError::kind`]).
//!
//! Cache-hit policy: a hit still appends a new [`AddressRecord`] with a fresh
//! id and timestamp, so the persisted history counts every served request,
//! not just upstream fetches. The response is faster (no fetch) but history
//! stays complete.

use std::sync::Arc;

use tracing::{debug, info};

use crate::address::TronAddress;
use crate::cache::{AccountCache, CacheStats};
use crate::config::ResolverConfig;
use crate::errors::ResolveError;
use crate::fetch::{AccountSource, RetryingFetcher};
use crate::store::{PageRequest, RecordPage, RecordStore};
use crate::types::AddressRecord;

/// A completed resolution: the persisted record plus provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The record appended for this request (fresh id and timestamp).
    pub record: AddressRecord,
    /// Whether the attributes came from the cache rather than a fetch.
    pub cache_hit: bool,
}

/// Orchestrates validation, caching, fetching, and persistence.
///
/// Holds its collaborators explicitly: created at service start with an
/// injected source and store, torn down at service stop. No module-level
/// state.
///
/// # Examples
///
/// ```rust,ignore
/// use trongaze::{Resolver, ResolverConfig, store::MemoryStore};
/// use std::sync::Arc;
///
/// let resolver = Resolver::new(source, Arc::new(MemoryStore::new()), ResolverConfig::default());
/// let resolution = resolver.resolve("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").await?;
/// println!("balance: {}", resolution.record.balance);
/// ```
pub struct Resolver<S> {
    cache: Arc<AccountCache>,
    fetcher: RetryingFetcher<S>,
    store: Arc<dyn RecordStore>,
}

impl<S: AccountSource> Resolver<S> {
    /// Creates a resolver over the given source and store.
    pub fn new(source: S, store: Arc<dyn RecordStore>, config: ResolverConfig) -> Self {
        Self {
            cache: Arc::new(AccountCache::new(config.cache_ttl, config.cache_capacity)),
            fetcher: RetryingFetcher::new(source, config.retry),
            store,
        }
    }

    /// Resolves one address string to its account attributes.
    ///
    /// Validation runs first, before any cache or network access, so
    /// malformed input is rejected without spending upstream quota. On a
    /// cache miss the fetch is retried per the configured policy; the result
    /// is persisted before the cache is populated, so the cache never holds
    /// attributes that were not durably recorded.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidAddress`]: the string failed validation
    /// - [`ResolveError::UpstreamUnavailable`]: the provider rejected the
    ///   request or the retry budget is exhausted
    /// - [`ResolveError::Storage`]: the record could not be persisted, even
    ///   though the fetch itself may have succeeded
    pub async fn resolve(&self, raw_address: &str) -> Result<Resolution, ResolveError> {
        // Validating
        let address = TronAddress::parse(raw_address)?;

        // CacheCheck
        if let Some(attributes) = self.cache.get(&address).await {
            // Persisting: a hit still records the request.
            let record = self.store.append(&address, &attributes).await?;
            debug!(address = %address, id = %record.id, "Resolved from cache");
            return Ok(Resolution {
                record,
                cache_hit: true,
            });
        }

        // Fetching
        let attributes = self.fetcher.fetch(&address).await?;

        // Persisting
        let record = self.store.append(&address, &attributes).await?;

        // CachePopulate: fresh TTL window, last write wins.
        self.cache.insert(address.clone(), attributes).await;

        info!(
            address = %address,
            id = %record.id,
            bandwidth = record.bandwidth,
            energy = record.energy,
            "Resolved from upstream"
        );

        Ok(Resolution {
            record,
            cache_hit: false,
        })
    }

    /// Returns one page of lookup history, newest first.
    ///
    /// Bypasses the cache and the fetcher entirely.
    pub async fn list_recent(&self, page: &PageRequest) -> Result<RecordPage, ResolveError> {
        let history = self.store.list_recent(page).await?;
        debug!(
            page = history.page,
            page_size = history.page_size,
            total = history.total,
            "Listed recent lookups"
        );
        Ok(history)
    }

    /// Snapshot of the cache's hit/miss/eviction counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
