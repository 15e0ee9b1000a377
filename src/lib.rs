//! Trongaze resolves TRON mainnet addresses to their account attributes
//! (bandwidth, energy, TRX balance) through a read-through cache, a retrying
//! upstream fetcher, and an append-only lookup history.
//!
//! The pipeline for one lookup:
//!
//! 1. Validate the address string (Base58Check, version `0x41`)
//! 2. Consult the [`cache::AccountCache`] (5-minute TTL, LRU-bounded)
//! 3. On a miss, fetch from an [`fetch::AccountSource`] with bounded retries
//! 4. Append a record to the [`store::RecordStore`], then populate the cache
//!
//! Every served request is recorded, cache hits included, so
//! [`Resolver::list_recent`] pages over the full request history.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trongaze::{Resolver, ResolverConfig, store::MemoryStore};
//!
//! let resolver = Resolver::new(source, Arc::new(MemoryStore::new()), ResolverConfig::default());
//! let resolution = resolver.resolve("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").await?;
//! println!("balance: {} TRX", resolution.record.balance);
//! ```

pub mod address;
pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod job;
pub mod resolver;
pub mod store;
pub mod types;

pub use address::TronAddress;
pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use errors::{ErrorKind, ResolveError, TrongazeError};
pub use job::{LookupJob, LookupJobHandle};
pub use resolver::{Resolution, Resolver};
pub use types::{AccountAttributes, AddressRecord, RecordId};
