//! Error types for the trongaze library.
//!
//! Follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`AddressError`],
//!   [`FetchError`], [`StoreError`], [`PageError`], [`ResolveError`])
//! - **Unified error type** ([`TrongazeError`]) for callers that don't need
//!   to distinguish between error sources
//!
//! The resolution pipeline's taxonomy maps onto client-facing classes via
//! [`ResolveError::kind`]: invalid input, service unavailable, or internal.
//! Validation and storage errors surface immediately with no retry; transient
//! upstream errors are retried inside the fetcher and only escalate once the
//! attempt budget is exhausted.

mod address;
mod fetch;
mod resolve;
mod store;

pub use address::AddressError;
pub use fetch::FetchError;
pub use resolve::{ErrorKind, ResolveError};
pub use store::{PageError, StoreError};

/// Unified error type for all trongaze operations.
///
/// Module-specific error types convert into `TrongazeError` via `From`, so
/// `?` propagates naturally across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TrongazeError {
    /// Error from address validation.
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Error from upstream account fetching.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from the record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from pagination validation.
    #[error("Pagination error: {0}")]
    Page(#[from] PageError),

    /// Error from the resolution pipeline.
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),
}
