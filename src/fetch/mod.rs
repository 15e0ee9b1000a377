//! Upstream account fetching.
//!
//! The remote provider is modeled as an opaque fetch capability behind the
//! [`AccountSource`] trait; the concrete TronGrid client lives outside this
//! crate. [`RetryingFetcher`] wraps any source with a bounded-attempt retry
//! loop and exponential backoff for transient failures.

use async_trait::async_trait;

use crate::address::TronAddress;
use crate::errors::FetchError;
use crate::types::AccountAttributes;

mod retry;

pub use retry::{RetryConfig, RetryConfigBuilder, RetryingFetcher};

/// Capability to fetch account attributes for a validated address.
///
/// Implementations wrap the actual provider client. The underlying call may
/// be blocking; implementations are expected to move blocking work onto a
/// dedicated context (e.g. `tokio::task::spawn_blocking`) so the async caller
/// never stalls unrelated requests.
///
/// # Error classification
///
/// Implementations must classify failures: network timeouts, connection
/// errors, and server-side 5xx responses are [`FetchError::Transient`]
/// (retried by [`RetryingFetcher`]); credential rejections and provider-side
/// address rejections are [`FetchError::Terminal`] (failed immediately).
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Fetches the `(bandwidth, energy, balance)` triple for `address`.
    async fn fetch_account(&self, address: &TronAddress)
        -> Result<AccountAttributes, FetchError>;
}
