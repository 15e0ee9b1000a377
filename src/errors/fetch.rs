//! Error types for upstream account fetching.

/// Errors that can occur while fetching account attributes upstream.
///
/// The transient/terminal split drives the retry loop: [`FetchError::Transient`]
/// failures (timeouts, connection resets, server-side 5xx, rate limiting) are
/// retried with backoff, everything else fails immediately.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A failure expected to be retry-recoverable.
    #[error("Transient upstream failure during {operation}")]
    Transient {
        /// Description of the operation that failed.
        operation: String,
        /// The underlying provider error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A rejection that retrying cannot fix, such as an invalid credential or
    /// a provider-side address rejection.
    #[error("Upstream rejected {operation}: {reason}")]
    Terminal {
        /// Description of the operation that was rejected.
        operation: String,
        /// Why the provider rejected it.
        reason: String,
    },

    /// All attempts failed with transient causes.
    ///
    /// Surfaced by the pipeline as a service-unavailable condition.
    #[error("Upstream unavailable for {address} after {attempts} attempts")]
    RetriesExhausted {
        /// The address being fetched.
        address: String,
        /// Total attempts made, including the first.
        attempts: u32,
        /// The last transient error observed.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    /// Creates a transient error from any underlying cause.
    pub fn transient(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        FetchError::Transient {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Creates a terminal rejection with a reason.
    pub fn terminal(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::Terminal {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Wraps the last transient error once the attempt budget is spent.
    pub fn retries_exhausted(address: impl Into<String>, attempts: u32, last: FetchError) -> Self {
        FetchError::RetriesExhausted {
            address: address.into(),
            attempts,
            source: Box::new(last),
        }
    }

    /// Whether the retry loop should attempt again on this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }
}
