//! Append-only persistence of resolved lookups.
//!
//! This module provides storage backends for lookup history:
//!
//! - [`MemoryStore`]: in-process store for tests and embedding
//! - [`DiskStore`]: versioned JSON file with atomic writes and file locking
//!
//! Every completed resolution appends exactly one [`AddressRecord`]; records
//! are immutable once written and are listed newest first with pagination.

use async_trait::async_trait;

use crate::address::TronAddress;
use crate::errors::{PageError, StoreError};
use crate::types::{AccountAttributes, AddressRecord};

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u64 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A validated pagination request.
///
/// `page` starts at 1; `page_size` is bounded to `[1, 100]`. Out-of-range
/// values are rejected with [`PageError`] rather than clamped.
///
/// # Examples
///
/// ```
/// use trongaze::store::PageRequest;
///
/// let page = PageRequest::new(2, 25).unwrap();
/// assert_eq!(page.offset(), 25);
///
/// assert!(PageRequest::new(0, 10).is_err());
/// assert!(PageRequest::new(1, 101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Validates and constructs a pagination request.
    pub fn new(page: u64, page_size: u64) -> Result<Self, PageError> {
        if page < 1 {
            return Err(PageError::PageOutOfRange { page });
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(PageError::PageSizeOutOfRange {
                page_size,
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The number of records per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    /// First page with the default page size.
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of lookup history, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    /// Count of all records in the store, regardless of slicing.
    pub total: u64,
    /// The request's page number.
    pub page: u64,
    /// The request's page size.
    pub page_size: u64,
    /// Records ordered by timestamp descending, ties broken by id descending.
    pub records: Vec<AddressRecord>,
}

/// Append-only record store with ordered, paginated retrieval.
///
/// # Thread safety
///
/// Implementations must be safe for concurrent appends and reads; use
/// interior mutability as needed.
///
/// # Durability
///
/// `append` must not return until the record is durably persisted for the
/// backend's durability class (process lifetime for [`MemoryStore`], synced
/// to disk for [`DiskStore`]). A failed write is reported, never swallowed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Assigns `id` and `timestamp`, persists the record, and returns it.
    ///
    /// Identifiers increase monotonically and are never reused; timestamps
    /// are non-decreasing with identifiers.
    async fn append(
        &self,
        address: &TronAddress,
        attributes: &AccountAttributes,
    ) -> Result<AddressRecord, StoreError>;

    /// Returns one page of records, newest first.
    ///
    /// Pages beyond the available data return an empty record list with the
    /// correct `total`, not an error.
    async fn list_recent(&self, page: &PageRequest) -> Result<RecordPage, StoreError>;

    /// Count of all persisted records.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Removes all records. For tests and lifecycle management.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Human-readable backend name, for logging.
    fn name(&self) -> &'static str;
}

/// Slices an ascending-ordered record list into a descending page.
///
/// Shared by the backends: `records` must be ordered oldest first (the
/// append order), which both backends guarantee by construction.
fn slice_descending(records: &[AddressRecord], page: &PageRequest) -> RecordPage {
    let total = records.len() as u64;
    let sliced: Vec<AddressRecord> = records
        .iter()
        .rev()
        .skip(page.offset() as usize)
        .take(page.page_size() as usize)
        .cloned()
        .collect();

    RecordPage {
        total,
        page: page.page(),
        page_size: page.page_size(),
        records: sliced,
    }
}
