//! Booking deduplication semantics.
//!
//! A stored record duplicates a proposed booking when all four identifiers
//! are equal and its timestamp lies inside the caller's closed window. Every
//! [`RecordStore`](crate::ports::RecordStore) implementation must answer
//! window queries with exactly this predicate.

use chrono::NaiveDate;

use super::types::{BookingKey, BookingRecord, DedupWindow};

pub fn is_within_window(record: &BookingRecord, key: &BookingKey, window: &DedupWindow) -> bool {
    record.key == *key && window.contains(record.timestamp)
}

/// Same-day roll call membership: prison equality and UTC date equality.
pub fn is_same_day(record: &BookingRecord, date: NaiveDate, prison_id: &str) -> bool {
    record.key.prison_id == prison_id && record.date() == date
}
