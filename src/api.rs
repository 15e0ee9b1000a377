//! Wire-level request and response shapes.
//!
//! These DTOs decouple the serialized surface from the internal domain
//! types: field names and formats here are a compatibility contract, while
//! [`AddressRecord`](crate::types::AddressRecord) and friends are free to
//! evolve. Timestamps serialize as RFC 3339 strings.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::resolver::Resolution;
use crate::store::RecordPage;
use crate::types::AddressRecord;

/// A lookup request: the raw, not-yet-validated address string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub address: String,
}

/// A successful lookup response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub address: String,
    pub bandwidth: u64,
    pub energy: u64,
    pub balance: BigDecimal,
}

impl From<&Resolution> for ResolveResponse {
    fn from(resolution: &Resolution) -> Self {
        Self {
            address: resolution.record.address.to_string(),
            bandwidth: resolution.record.bandwidth,
            energy: resolution.record.energy,
            balance: resolution.record.balance.clone(),
        }
    }
}

/// One persisted lookup, as exposed in the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecordDto {
    pub id: u64,
    pub address: String,
    pub bandwidth: u64,
    pub energy: u64,
    pub balance: BigDecimal,
    /// RFC 3339 timestamp of when the lookup was recorded.
    pub timestamp: String,
}

impl From<&AddressRecord> for AddressRecordDto {
    fn from(record: &AddressRecord) -> Self {
        Self {
            id: record.id.value(),
            address: record.address.to_string(),
            bandwidth: record.bandwidth,
            energy: record.energy,
            balance: record.balance.clone(),
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

/// One page of lookup history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLookupsResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub data: Vec<AddressRecordDto>,
}

impl From<&RecordPage> for RecentLookupsResponse {
    fn from(page: &RecordPage) -> Self {
        Self {
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            data: page.records.iter().map(AddressRecordDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::TronAddress;
    use crate::types::RecordId;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn sample_record() -> AddressRecord {
        AddressRecord {
            id: RecordId::new(7),
            address: TronAddress::parse("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").unwrap(),
            bandwidth: 1500,
            energy: 3200,
            balance: BigDecimal::from_str("0.088946").unwrap(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn record_dto_uses_rfc3339_timestamps() {
        let dto = AddressRecordDto::from(&sample_record());
        assert_eq!(dto.id, 7);
        assert_eq!(dto.timestamp, "2026-08-27T12:00:00+00:00");

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"timestamp\":\"2026-08-27T12:00:00+00:00\""));
    }

    #[test]
    fn resolve_response_from_resolution() {
        let resolution = Resolution {
            record: sample_record(),
            cache_hit: true,
        };
        let response = ResolveResponse::from(&resolution);
        assert_eq!(response.address, "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t");
        assert_eq!(response.bandwidth, 1500);
        assert_eq!(response.balance, BigDecimal::from_str("0.088946").unwrap());
    }

    #[test]
    fn recent_lookups_response_shape() {
        let page = RecordPage {
            total: 1,
            page: 1,
            page_size: 10,
            records: vec![sample_record()],
        };
        let response = RecentLookupsResponse::from(&page);
        assert_eq!(response.total, 1);
        assert_eq!(response.data.len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["data"][0]["id"], 7);
    }
}
