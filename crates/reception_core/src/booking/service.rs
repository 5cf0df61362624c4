//! Booking service
//!
//! Check and insert are separate operations. `confirm_arrival` composes them
//! for convenience but is not atomic: two concurrent confirmations of the
//! same movement can both insert. Atomicity belongs to the record store's
//! transaction boundary.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use super::types::{ArrivalType, BookingKey, BookingRecord, DedupWindow};
use crate::error::{ReceptionError, Result};
use crate::ports::RecordStore;

/// Outcome of confirming an arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalOutcome {
    Recorded(Uuid),
    /// Matching bookings already exist inside the window; nothing was inserted.
    AlreadyRecorded(Vec<BookingRecord>),
}

/// Per-type count of one day's bookings at one prison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollCallSummary {
    pub prison_id: String,
    pub date: NaiveDate,
    pub total: usize,
    pub by_arrival_type: BTreeMap<ArrivalType, usize>,
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn RecordStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Existing bookings for `key` with a timestamp inside `window`.
    pub async fn check_duplicate(
        &self,
        key: &BookingKey,
        window: &DedupWindow,
    ) -> Result<Vec<BookingRecord>> {
        let existing = self.store.find_within_window(key, window).await?;
        if !existing.is_empty() {
            tracing::info!(
                prison_id = %key.prison_id,
                movement_id = %key.movement_id,
                prisoner_id = %key.prisoner_id,
                existing = existing.len(),
                "duplicate booking found"
            );
        }
        Ok(existing)
    }

    pub async fn record_booking(&self, record: BookingRecord) -> Result<Uuid> {
        let prison_id = record.key.prison_id.clone();
        let arrival_type = record.arrival_type;
        let id = self.store.insert(record).await?;
        tracing::info!(%id, %prison_id, %arrival_type, "booking recorded");
        Ok(id)
    }

    /// Check `[timestamp - tolerance, timestamp + tolerance]` and insert only
    /// when nothing matches.
    pub async fn confirm_arrival(
        &self,
        record: BookingRecord,
        tolerance: Duration,
    ) -> Result<ArrivalOutcome> {
        let window = DedupWindow::around(record.timestamp, tolerance)?;
        let existing = self.check_duplicate(&record.key, &window).await?;
        if !existing.is_empty() {
            return Ok(ArrivalOutcome::AlreadyRecorded(existing));
        }
        Ok(ArrivalOutcome::Recorded(self.record_booking(record).await?))
    }

    /// The day's bookings at a prison, earliest first.
    pub async fn roll_call(&self, date: NaiveDate, prison_id: &str) -> Result<Vec<BookingRecord>> {
        let mut records = self.store.find_by_date_and_prison(date, prison_id).await?;
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }

    pub async fn roll_call_summary(
        &self,
        date: NaiveDate,
        prison_id: &str,
    ) -> Result<RollCallSummary> {
        let records = self.store.find_by_date_and_prison(date, prison_id).await?;
        let mut by_arrival_type = BTreeMap::new();
        for record in &records {
            *by_arrival_type.entry(record.arrival_type).or_insert(0) += 1;
        }
        Ok(RollCallSummary {
            prison_id: prison_id.to_string(),
            date,
            total: records.len(),
            by_arrival_type,
        })
    }

    pub async fn find_booking(&self, id: Uuid) -> Result<BookingRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReceptionError::NotFound(format!("booking {id}")))
    }
}
