//! Default values for the resolution pipeline.
//!
//! Centralizes the magic numbers used throughout the crate, improving
//! discoverability and keeping tests and builders in agreement.

use std::time::Duration;

/// How long a cached attribute triple stays fresh (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached addresses before LRU eviction starts.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
