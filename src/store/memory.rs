//! In-memory record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{slice_descending, PageRequest, RecordPage, RecordStore};
use crate::address::TronAddress;
use crate::errors::StoreError;
use crate::types::{AccountAttributes, AddressRecord, RecordId};

/// Internal state guarded by the mutex.
#[derive(Debug, Default)]
struct MemoryStoreState {
    /// Records in append order (ascending id, non-decreasing timestamp).
    records: Vec<AddressRecord>,
    next_id: RecordId,
    last_timestamp: Option<DateTime<Utc>>,
}

/// In-process record store.
///
/// Durable for the lifetime of the process; intended for tests and for
/// embedding the pipeline without a backing file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryStore {
    /// Creates an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(
        &self,
        address: &TronAddress,
        attributes: &AccountAttributes,
    ) -> Result<AddressRecord, StoreError> {
        let mut state = self.state.lock().await;

        let id = state.next_id.next();
        state.next_id = id;

        // Clamp against the previous timestamp so timestamps never decrease
        // with increasing id, even if the wall clock steps backwards.
        let now = Utc::now();
        let timestamp = match state.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        state.last_timestamp = Some(timestamp);

        let record = AddressRecord {
            id,
            address: address.clone(),
            bandwidth: attributes.bandwidth,
            energy: attributes.energy,
            balance: attributes.balance.clone(),
            timestamp,
        };

        debug!(id = %record.id, address = %address, "Appended lookup record (memory)");
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self, page: &PageRequest) -> Result<RecordPage, StoreError> {
        let state = self.state.lock().await;
        Ok(slice_descending(&state.records, page))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let state = self.state.lock().await;
        Ok(state.records.len() as u64)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        debug!(records = state.records.len(), "Clearing memory store");
        state.records.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MemoryStore"
    }
}
