//! Core domain types for account lookups.
//!
//! This module provides the value types that flow through the resolution
//! pipeline:
//!
//! - [`AccountAttributes`]: the triple fetched from the upstream provider
//! - [`AddressRecord`]: one persisted lookup, with store-assigned identity
//! - [`RecordId`]: monotonic record identifier, never reused

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::TronAddress;

/// Monotonically increasing identifier for a persisted lookup record.
///
/// Assigned by the record store at insertion time. Identifiers are never
/// reused, and records created later always carry larger identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a record identifier from a raw value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the next identifier in sequence.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The account attributes served by the upstream provider.
///
/// Bandwidth and energy are TRON resource limits (whole units); the balance
/// is the account's TRX holdings, which can be fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAttributes {
    /// Available bandwidth for the account.
    pub bandwidth: u64,
    /// Available energy for the account.
    pub energy: u64,
    /// TRX balance. Non-negative; the fetcher rejects providers that report
    /// a negative balance as a terminal malformed response.
    pub balance: BigDecimal,
}

impl AccountAttributes {
    /// Creates a new attribute triple.
    pub fn new(bandwidth: u64, energy: u64, balance: BigDecimal) -> Self {
        Self {
            bandwidth,
            energy,
            balance,
        }
    }
}

/// One completed, persisted lookup.
///
/// Created once by the record store when a resolution completes and immutable
/// thereafter. Repeated lookups of the same address each produce a new record,
/// so `address` is not unique across records. The `timestamp` is assigned at
/// insertion and is monotonically non-decreasing with `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Store-assigned identifier, unique and monotonically increasing.
    pub id: RecordId,
    /// The validated address that was looked up.
    pub address: TronAddress,
    /// Bandwidth at resolution time.
    pub bandwidth: u64,
    /// Energy at resolution time.
    pub energy: u64,
    /// TRX balance at resolution time.
    pub balance: BigDecimal,
    /// Store-assigned creation time.
    pub timestamp: DateTime<Utc>,
}

impl AddressRecord {
    /// Returns the attribute triple carried by this record.
    pub fn attributes(&self) -> AccountAttributes {
        AccountAttributes {
            bandwidth: self.bandwidth,
            energy: self.energy,
            balance: self.balance.clone(),
        }
    }
}
