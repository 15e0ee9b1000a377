//! Error types for record persistence and pagination.

/// Errors from the record store backends.
///
/// Append failures are always surfaced: a lookup is never reported as
/// successful without a durably written record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O operation on the backing file failed.
    #[error("Failed to {operation} at '{path}'")]
    Io {
        /// Description of the file operation (e.g. "write records").
        operation: String,
        /// Path of the backing file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Record data could not be serialized or parsed.
    #[error("Failed to serialize record data")]
    Serialization(#[from] serde_json::Error),

    /// The store file was written by an incompatible format version.
    ///
    /// Surfaced instead of starting empty, so a format bump never silently
    /// discards history. Migrate or move the file aside to proceed.
    #[error("Store file '{path}' has unsupported version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Path of the backing file.
        path: String,
        /// Version recorded in the file.
        found: u32,
        /// Version this build reads and writes.
        supported: u32,
    },

    /// The store refused the append.
    #[error("Record store rejected append: {reason}")]
    AppendRejected {
        /// Why the append was refused.
        reason: String,
    },
}

impl StoreError {
    /// Helper to create an `Io` error with operation and path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        StoreError::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Helper to create an `AppendRejected` error.
    pub fn append_rejected(reason: impl Into<String>) -> Self {
        StoreError::AppendRejected {
            reason: reason.into(),
        }
    }
}

/// Pagination parameters outside the accepted ranges.
///
/// Out-of-range values are rejected rather than clamped, matching the
/// validation behavior of the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// `page` must be at least 1.
    #[error("page must be >= 1, got {page}")]
    PageOutOfRange {
        /// The rejected page number.
        page: u64,
    },

    /// `page_size` must be within `[min, max]`.
    #[error("page_size must be between {min} and {max}, got {page_size}")]
    PageSizeOutOfRange {
        /// The rejected page size.
        page_size: u64,
        /// Smallest accepted page size.
        min: u64,
        /// Largest accepted page size.
        max: u64,
    },
}
