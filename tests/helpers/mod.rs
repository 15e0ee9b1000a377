//! Test helpers for trongaze integration tests
//!
//! Provides mock implementations of traits to enable testing without
//! real provider connections.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use trongaze::errors::{FetchError, StoreError};
use trongaze::fetch::AccountSource;
use trongaze::store::{PageRequest, RecordPage, RecordStore};
use trongaze::types::{AccountAttributes, AddressRecord};
use trongaze::TronAddress;

/// Valid mainnet addresses for use as fixtures.
#[allow(dead_code)]
pub const ADDRESSES: [&str; 4] = [
    "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
    "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb",
    "TKkeiboTkxXKJpbmVFbv4a8ov5rAfRDMf9",
    "TLsV52sRDL79HXGGm9yzwKibb6BeruhUzy",
];

#[allow(dead_code)]
pub fn test_address(index: usize) -> TronAddress {
    TronAddress::parse(ADDRESSES[index]).unwrap()
}

#[allow(dead_code)]
pub fn test_attributes(bandwidth: u64) -> AccountAttributes {
    AccountAttributes::new(bandwidth, bandwidth * 2, BigDecimal::from(bandwidth))
}

/// Installs a compact tracing subscriber so failures can be diagnosed with
/// `RUST_LOG=debug`. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// One scripted response for [`MockSource`].
#[allow(dead_code)]
pub enum MockOutcome {
    Ok(AccountAttributes),
    Transient,
    Terminal(&'static str),
}

impl MockOutcome {
    fn into_result(self) -> Result<AccountAttributes, FetchError> {
        match self {
            MockOutcome::Ok(attributes) => Ok(attributes),
            MockOutcome::Transient => Err(FetchError::transient(
                "get_account",
                std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timed out"),
            )),
            MockOutcome::Terminal(reason) => Err(FetchError::terminal("get_account", reason)),
        }
    }
}

/// Mock AccountSource for testing resolver logic
///
/// Serves a scripted queue of outcomes, then falls back to a default
/// success, and counts every call so tests can assert exactly how many
/// times the upstream was touched.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockSource::new()
///     .with_outcomes(vec![MockOutcome::Transient, MockOutcome::Ok(attrs)]);
/// let calls = source.call_counter();
///
/// let resolver = Resolver::new(source, store, config);
/// ```
pub struct MockSource {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    fallback: AccountAttributes,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    /// Creates a source that always succeeds with default attributes.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            fallback: AccountAttributes::new(1500, 3200, BigDecimal::from(42)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Scripts the outcomes served, in order, before the fallback kicks in.
    #[allow(dead_code)]
    pub fn with_outcomes(self, outcomes: Vec<MockOutcome>) -> Self {
        *self.outcomes.lock().unwrap() = outcomes.into();
        self
    }

    /// Sets the attributes served once the scripted outcomes are consumed.
    #[allow(dead_code)]
    pub fn with_fallback(mut self, attributes: AccountAttributes) -> Self {
        self.fallback = attributes;
        self
    }

    /// Returns a handle to the call counter, usable after the source has
    /// been moved into a resolver.
    #[allow(dead_code)]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl AccountSource for MockSource {
    async fn fetch_account(
        &self,
        _address: &TronAddress,
    ) -> Result<AccountAttributes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.lock().unwrap().pop_front() {
            Some(outcome) => outcome.into_result(),
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Record store whose every operation fails.
///
/// For testing that storage failures surface instead of being swallowed.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn append(
        &self,
        _address: &TronAddress,
        _attributes: &AccountAttributes,
    ) -> Result<AddressRecord, StoreError> {
        Err(StoreError::append_rejected("backing volume is read-only"))
    }

    async fn list_recent(&self, _page: &PageRequest) -> Result<RecordPage, StoreError> {
        Err(StoreError::append_rejected("backing volume is read-only"))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::append_rejected("backing volume is read-only"))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::append_rejected("backing volume is read-only"))
    }

    fn name(&self) -> &'static str {
        "FailingStore"
    }
}
