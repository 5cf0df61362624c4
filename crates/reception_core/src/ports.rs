//! Port traits for the external collaborators.
//!
//! The core only depends on these contracts. Postgres and HTTP adapters live
//! in `reception_postgres` and `reception_server`; the in-memory store lives in
//! [`crate::booking::memory`].

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::booking::types::{BookingKey, BookingRecord, DedupWindow};
use crate::error::Result;
use crate::matching::{IdentityQuery, MatchedIdentity};

/// Upstream identity registry.
#[async_trait]
pub trait IdentitySearchGateway: Send + Sync {
    /// Returns candidate records, or an empty list when the registry has none.
    async fn search(&self, query: &IdentityQuery) -> Result<Vec<MatchedIdentity>>;
}

/// Persistence for booking records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records equal on all four identifiers with `from <= timestamp <= to`.
    async fn find_within_window(
        &self,
        key: &BookingKey,
        window: &DedupWindow,
    ) -> Result<Vec<BookingRecord>>;

    /// Records for one prison whose timestamp falls on `date` (UTC).
    async fn find_by_date_and_prison(
        &self,
        date: NaiveDate,
        prison_id: &str,
    ) -> Result<Vec<BookingRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingRecord>>;

    /// Insert a new record and return the identifier the store assigned.
    /// Any `id` already set on `record` is ignored.
    async fn insert(&self, record: BookingRecord) -> Result<Uuid>;
}

/// A raw per-person count as reported by the scan-count source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScanCount {
    pub person_identifier: String,
    pub count: u32,
}

/// Source of per-person event counts (e.g. body scans).
///
/// Persons with no qualifying events are simply absent from the response.
#[async_trait]
pub trait ScanCountSource: Send + Sync {
    async fn counts(
        &self,
        event_type: &str,
        from: NaiveDate,
        to: NaiveDate,
        person_identifiers: &[String],
    ) -> Result<Vec<RawScanCount>>;
}
