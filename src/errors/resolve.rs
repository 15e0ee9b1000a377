//! Error types for the resolution pipeline.

use super::{AddressError, FetchError, PageError, StoreError};

/// Client-facing classification of a resolution failure.
///
/// Each variant maps to a distinct status at the service boundary: invalid
/// input, service unavailable, and internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was malformed (bad address or pagination).
    InvalidInput,
    /// The upstream provider could not serve the request.
    ServiceUnavailable,
    /// The service failed internally (persistence, shutdown).
    Internal,
}

/// Errors surfaced by the resolution pipeline.
///
/// Terminal states of the pipeline's state machine: validation failures occur
/// before any cache or network access, upstream failures after the retry
/// budget is spent, and storage failures even when the fetch itself succeeded.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The address string failed validation. No I/O was performed.
    #[error("Invalid TRON address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The upstream provider is unavailable or rejected the request.
    #[error("Upstream provider unavailable: {0}")]
    UpstreamUnavailable(#[from] FetchError),

    /// The resolved attributes could not be durably persisted.
    ///
    /// Raised even when the fetch succeeded; success is never reported
    /// without a recorded lookup.
    #[error("Failed to persist lookup record: {0}")]
    Storage(#[from] StoreError),

    /// The history query carried invalid pagination parameters.
    #[error("Invalid pagination request: {0}")]
    Pagination(#[from] PageError),

    /// The lookup job has shut down and can no longer accept requests.
    #[error("Lookup service stopped")]
    ServiceStopped,
}

impl ResolveError {
    /// Classifies this error for the service boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidAddress(_) | ResolveError::Pagination(_) => {
                ErrorKind::InvalidInput
            }
            ResolveError::UpstreamUnavailable(_) => ErrorKind::ServiceUnavailable,
            ResolveError::Storage(_) | ResolveError::ServiceStopped => ErrorKind::Internal,
        }
    }
}
