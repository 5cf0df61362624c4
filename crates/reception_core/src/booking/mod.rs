//! Booking records: deduplication checks, recording and same-day roll call.

pub mod dedup;
pub mod memory;
pub mod service;
pub mod types;

pub use memory::InMemoryRecordStore;
pub use service::{ArrivalOutcome, BookingService, RollCallSummary};
pub use types::{ArrivalType, BookingKey, BookingRecord, DedupWindow};
