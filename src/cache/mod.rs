//! Read-through cache for resolved account attributes.
//!
//! [`AccountCache`] is a time-bounded, capacity-bounded map from validated
//! address to attribute triple. The pipeline consults it before any upstream
//! call; entries expire a fixed TTL after insertion and are lazily purged on
//! access. When the capacity bound is reached, the least-recently-used entry
//! is evicted, with a monotonic access sequence breaking timestamp ties.
//!
//! No single-flight guarantee: concurrent misses for the same address may
//! each trigger their own fetch, and cache population is last-write-wins. The
//! critical section covers only the map operation, never any I/O.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;
use tracing::debug;

use crate::address::TronAddress;
use crate::types::AccountAttributes;

/// Milliseconds since the Unix epoch.
///
/// Entry expiry and LRU ordering both work on this scale; millisecond
/// precision keeps the ordering stable for entries created back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampMillis(u128);

impl TimestampMillis {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(epoch_millis(SystemTime::now()))
    }

    /// How much time has passed since this timestamp.
    ///
    /// A timestamp in the future reports zero.
    pub fn elapsed(&self) -> Duration {
        let now = epoch_millis(SystemTime::now());
        Duration::from_millis(now.saturating_sub(self.0) as u64)
    }

    /// Whether more than `ttl` has passed since this timestamp.
    ///
    /// ```
    /// use trongaze::cache::TimestampMillis;
    /// use std::time::Duration;
    ///
    /// let stamp = TimestampMillis::now();
    /// assert!(!stamp.is_older_than(Duration::from_secs(60)));
    /// ```
    pub fn is_older_than(&self, ttl: Duration) -> bool {
        self.elapsed() > ttl
    }
}

fn epoch_millis(at: SystemTime) -> u128 {
    at.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Tick counter that orders cache accesses sharing a millisecond.
///
/// The lower tick is the older access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AccessSequence(u64);

impl AccessSequence {
    /// Returns the next tick.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Entry in the cache with expiry and access metadata.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached attribute triple.
    attributes: AccountAttributes,
    /// When this entry was inserted (expiry is measured from here).
    created_at: TimestampMillis,
    /// When this entry was last accessed (for LRU eviction).
    last_accessed: TimestampMillis,
    /// Tie-breaker for LRU ordering when timestamps are equal.
    access_seq: AccessSequence,
}

impl CacheEntry {
    fn new(attributes: AccountAttributes, access_seq: AccessSequence) -> Self {
        let now = TimestampMillis::now();
        Self {
            attributes,
            created_at: now,
            last_accessed: now,
            access_seq,
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.is_older_than(ttl)
    }

    fn touch(&mut self, access_seq: AccessSequence) {
        self.last_accessed = TimestampMillis::now();
        self.access_seq = access_seq;
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries evicted due to the capacity bound.
    pub evictions: u64,
    /// Number of entries expired due to TTL.
    pub expirations: u64,
    /// Current number of entries in the cache.
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.expirations,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Internal state guarded by the mutex.
#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<TronAddress, CacheEntry>,
    stats: CacheStats,
    next_seq: AccessSequence,
}

/// Time- and capacity-bounded cache of account attributes.
///
/// Created once at service start and injected into the pipeline; torn down
/// at service stop. Thread-safe for concurrent resolutions.
///
/// # Examples
///
/// ```rust,ignore
/// use trongaze::cache::AccountCache;
/// use std::time::Duration;
///
/// let cache = AccountCache::new(Duration::from_secs(300), 100);
/// cache.insert(address, attributes).await;
/// assert!(cache.get(&address).await.is_some());
/// ```
#[derive(Debug)]
pub struct AccountCache {
    ttl: Duration,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl AccountCache {
    /// Creates a cache with the given time-to-live and maximum entry count.
    ///
    /// `capacity` is clamped to at least 1: eviction must always be able to
    /// free a slot for the entry being inserted.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Returns the cached attributes iff present and not expired.
    ///
    /// An expired entry is treated identically to absence and is purged on
    /// access (counted as an expiration, not an eviction).
    pub async fn get(&self, address: &TronAddress) -> Option<AccountAttributes> {
        let mut state = self.state.lock().await;

        let seq = state.next_seq;
        let ttl = self.ttl;

        let result = match state.entries.get_mut(address) {
            Some(entry) if entry.is_expired(ttl) => {
                debug!(address = %address, "Cache entry expired");
                state.entries.remove(address);
                state.stats.expirations += 1;
                None
            }
            Some(entry) => {
                entry.touch(seq);
                let attributes = entry.attributes.clone();
                state.next_seq = state.next_seq.next();
                Some(attributes)
            }
            None => None,
        };

        if result.is_some() {
            state.stats.hits += 1;
            debug!(address = %address, "Cache hit");
        } else {
            state.stats.misses += 1;
            debug!(address = %address, "Cache miss");
        }
        state.stats.entries = state.entries.len();

        result
    }

    /// Inserts or replaces the entry, starting a fresh TTL window.
    ///
    /// When the cache is at capacity, the least-recently-used entry is
    /// evicted first.
    pub async fn insert(&self, address: TronAddress, attributes: AccountAttributes) {
        let mut state = self.state.lock().await;

        // Replacing an existing key does not need an eviction.
        if !state.entries.contains_key(&address) {
            while state.entries.len() >= self.capacity {
                Self::evict_lru(&mut state);
            }
        }

        debug!(address = %address, "Populating cache entry");
        let seq = state.next_seq;
        state.next_seq = state.next_seq.next();
        state.entries.insert(address, CacheEntry::new(attributes, seq));
        state.stats.entries = state.entries.len();
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing account cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    /// Returns a snapshot of cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }

    /// Evicts the least-recently-used entry.
    fn evict_lru(state: &mut CacheState) {
        if state.entries.is_empty() {
            return;
        }

        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_accessed, entry.access_seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = lru_key {
            debug!(address = %key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    // Valid mainnet addresses for keying the cache in tests.
    const ADDRESSES: [&str; 4] = [
        "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
        "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb",
        "TKkeiboTkxXKJpbmVFbv4a8ov5rAfRDMf9",
        "TLsV52sRDL79HXGGm9yzwKibb6BeruhUzy",
    ];

    fn test_address(index: usize) -> TronAddress {
        TronAddress::parse(ADDRESSES[index]).unwrap()
    }

    fn test_attributes(bandwidth: u64) -> AccountAttributes {
        AccountAttributes::new(bandwidth, bandwidth * 2, BigDecimal::from(bandwidth))
    }

    #[tokio::test]
    async fn basic_get_and_insert() {
        let cache = AccountCache::new(Duration::from_secs(300), 100);
        let address = test_address(0);

        assert!(cache.get(&address).await.is_none());

        cache.insert(address.clone(), test_attributes(1000)).await;
        let hit = cache.get(&address).await.unwrap();
        assert_eq!(hit.bandwidth, 1000);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn expired_entry_is_treated_as_absent() {
        let cache = AccountCache::new(Duration::from_millis(50), 100);
        let address = test_address(0);

        cache.insert(address.clone(), test_attributes(1)).await;
        assert!(cache.get(&address).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get(&address).await.is_none());
        let stats = cache.stats().await;
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn insert_restarts_ttl_window() {
        let cache = AccountCache::new(Duration::from_millis(80), 100);
        let address = test_address(0);

        cache.insert(address.clone(), test_attributes(1)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Re-insert resets expiry.
        cache.insert(address.clone(), test_attributes(2)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        let hit = cache.get(&address).await.unwrap();
        assert_eq!(hit.bandwidth, 2);
    }

    #[tokio::test]
    async fn capacity_bound_evicts_lru() {
        let cache = AccountCache::new(Duration::from_secs(300), 3);

        for i in 0..3 {
            cache.insert(test_address(i), test_attributes(i as u64)).await;
        }

        // Touch entry 0 so entry 1 becomes the LRU.
        assert!(cache.get(&test_address(0)).await.is_some());

        cache.insert(test_address(3), test_attributes(3)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.evictions, 1);

        assert!(cache.get(&test_address(0)).await.is_some());
        assert!(cache.get(&test_address(1)).await.is_none());
        assert!(cache.get(&test_address(2)).await.is_some());
        assert!(cache.get(&test_address(3)).await.is_some());
    }

    #[tokio::test]
    async fn replacing_existing_key_does_not_evict() {
        let cache = AccountCache::new(Duration::from_secs(300), 2);
        cache.insert(test_address(0), test_attributes(1)).await;
        cache.insert(test_address(1), test_attributes(2)).await;

        cache.insert(test_address(0), test_attributes(9)).await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.evictions, 0);
        assert_eq!(cache.get(&test_address(0)).await.unwrap().bandwidth, 9);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let cache = AccountCache::new(Duration::from_secs(300), 100);
        for i in 0..4 {
            cache.insert(test_address(i), test_attributes(i as u64)).await;
        }

        cache.clear().await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 0);
        for i in 0..4 {
            assert!(cache.get(&test_address(i)).await.is_none());
        }
    }

    #[tokio::test]
    async fn zero_capacity_behaves_as_single_entry() {
        let cache = AccountCache::new(Duration::from_secs(300), 0);

        // Inserting past the bound must evict and complete, never spin.
        tokio::time::timeout(Duration::from_secs(2), async {
            cache.insert(test_address(0), test_attributes(1)).await;
            cache.insert(test_address(1), test_attributes(2)).await;
        })
        .await
        .expect("insert into a zero-capacity cache must complete");

        assert!(cache.get(&test_address(0)).await.is_none());
        assert_eq!(cache.get(&test_address(1)).await.unwrap().bandwidth, 2);
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[test]
    fn stale_timestamp_is_older_than_ttl() {
        let epoch = TimestampMillis(0);
        assert!(epoch.is_older_than(Duration::from_secs(60)));
        assert!(epoch.elapsed() > Duration::from_secs(60));

        let fresh = TimestampMillis::now();
        assert!(!fresh.is_older_than(Duration::from_secs(60)));
    }

    #[test]
    fn future_timestamp_has_zero_elapsed() {
        let future = TimestampMillis(epoch_millis(SystemTime::now()) + 5_000);
        assert_eq!(future.elapsed(), Duration::ZERO);
        assert!(!future.is_older_than(Duration::ZERO));
    }

    #[test]
    fn access_ticks_are_ordered_and_saturate() {
        let first = AccessSequence::default();
        assert!(first < first.next());

        let ceiling = AccessSequence(u64::MAX);
        assert_eq!(ceiling.next(), ceiling);
    }

    #[tokio::test]
    async fn hit_rate_reflects_accesses() {
        let cache = AccountCache::new(Duration::from_secs(300), 100);
        let address = test_address(0);

        cache.get(&address).await;
        cache.insert(address.clone(), test_attributes(1)).await;
        cache.get(&address).await;
        cache.get(&address).await;
        cache.get(&address).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 75.0);
    }
}
