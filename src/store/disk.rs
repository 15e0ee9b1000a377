//! Disk-backed record store with file locking and versioning.

use std::fs::File;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{slice_descending, PageRequest, RecordPage, RecordStore};
use crate::address::TronAddress;
use crate::errors::StoreError;
use crate::types::{AccountAttributes, AddressRecord, RecordId};

/// Current store format version.
const STORE_VERSION: u32 = 1;

/// Serialized store format (versioned).
#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    /// Store format version.
    version: u32,
    /// The next identifier to assign.
    next_id: RecordId,
    /// Records in append order (ascending id, non-decreasing timestamp).
    records: Vec<AddressRecord>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: RecordId::default(),
            records: Vec::new(),
        }
    }
}

/// Record store persisted as a versioned JSON file.
///
/// - Atomic writes via a temp file and rename, synced before the rename so
///   an acknowledged append survives a crash
/// - Advisory file locking for multi-process safety (std `File` locks)
/// - Format versioning: a file with an unrecognized version is refused, not
///   overwritten
/// - Path validation with helpful error messages
///
/// # Examples
///
/// ```rust,ignore
/// use trongaze::store::DiskStore;
///
/// let store = DiskStore::new("lookups.json").validate()?;
/// let record = store.append(&address, &attributes).await?;
/// ```
#[derive(Debug)]
pub struct DiskStore {
    path: PathBuf,
    /// Serializes load-modify-save cycles within this process.
    write_lock: Mutex<()>,
}

impl DiskStore {
    /// Creates a disk store backed by the given file path.
    ///
    /// Path validation is not performed until the first I/O operation; use
    /// [`validate()`](Self::validate) to check it immediately.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Validates the store path, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or is not
    /// writable.
    pub fn validate(self) -> Result<Self, StoreError> {
        let parent = self.path.parent().ok_or_else(|| {
            StoreError::io(
                "resolve parent directory",
                self.path.display().to_string(),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "store path has no parent directory",
                ),
            )
        })?;

        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::io("create store directory", parent.display().to_string(), e)
            })?;
            debug!(path = %parent.display(), "Created store directory");
        }

        let test_file = parent.join(".store_write_test");
        std::fs::write(&test_file, b"test").map_err(|e| {
            StoreError::io("write to store directory", parent.display().to_string(), e)
        })?;
        let _ = std::fs::remove_file(&test_file);

        debug!(path = %self.path.display(), "Store path validated");
        Ok(self)
    }

    /// Loads store data from disk with a shared lock.
    async fn load(&self) -> Result<StoreData, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store file does not exist, starting empty");
            return Ok(StoreData::default());
        }

        let file = File::open(&self.path)
            .map_err(|e| StoreError::io("open store file", self.path.display().to_string(), e))?;

        file.lock_shared().map_err(|e| {
            StoreError::io("lock store file", self.path.display().to_string(), e)
        })?;

        let data: StoreData = serde_json::from_reader(&file)?;
        drop(file);

        if data.version != STORE_VERSION {
            warn!(
                path = %self.path.display(),
                stored_version = data.version,
                current_version = STORE_VERSION,
                "Refusing store file with unsupported version"
            );
            return Err(StoreError::UnsupportedVersion {
                path: self.path.display().to_string(),
                found: data.version,
                supported: STORE_VERSION,
            });
        }

        Ok(data)
    }

    /// Saves store data atomically: temp write, sync, exclusive lock, rename.
    async fn save(&self, data: &StoreData) -> Result<(), StoreError> {
        let json = serde_json::to_vec(data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::io("create store directory", parent.display().to_string(), e)
                })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");

        tokio::fs::write(&temp_path, &json).await.map_err(|e| {
            StoreError::io("write store file", temp_path.display().to_string(), e)
        })?;

        let file = File::open(&temp_path)
            .map_err(|e| StoreError::io("open temp store file", temp_path.display().to_string(), e))?;

        file.lock().map_err(|e| {
            StoreError::io("lock temp store file", temp_path.display().to_string(), e)
        })?;

        // An acknowledged append must survive a crash, so sync before the
        // rename makes the new contents the store file.
        file.sync_all().map_err(|e| {
            StoreError::io("sync store file", temp_path.display().to_string(), e)
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StoreError::io("rename store file", self.path.display().to_string(), e)
        })?;

        drop(file);

        debug!(
            path = %self.path.display(),
            records = data.records.len(),
            "Saved record store"
        );

        Ok(())
    }
}

#[async_trait]
impl RecordStore for DiskStore {
    async fn append(
        &self,
        address: &TronAddress,
        attributes: &AccountAttributes,
    ) -> Result<AddressRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut data = self.load().await?;

        let id = data.next_id.next();
        data.next_id = id;

        // Timestamps never decrease with increasing id.
        let now = Utc::now();
        let timestamp = match data.records.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let record = AddressRecord {
            id,
            address: address.clone(),
            bandwidth: attributes.bandwidth,
            energy: attributes.energy,
            balance: attributes.balance.clone(),
            timestamp,
        };

        data.records.push(record.clone());
        self.save(&data).await?;

        info!(id = %record.id, address = %address, "Appended lookup record (disk)");
        Ok(record)
    }

    async fn list_recent(&self, page: &PageRequest) -> Result<RecordPage, StoreError> {
        let data = self.load().await?;
        Ok(slice_descending(&data.records, page))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let data = self.load().await?;
        Ok(data.records.len() as u64)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        // Keep the id sequence across a clear so identifiers are never reused.
        let mut data = self.load().await?;
        debug!(path = %self.path.display(), records = data.records.len(), "Clearing disk store");
        data.records.clear();
        self.save(&data).await
    }

    fn name(&self) -> &'static str {
        "DiskStore"
    }
}
