//! Scan-limit tracking: yearly per-person event counts and the scanning
//! decision derived from them.

pub mod aggregator;
pub mod limits;

pub use aggregator::{year_range, ScanCountAggregator, ScanCountEntry, BODY_SCAN_EVENT_TYPE};
pub use limits::{ScanLimitEntry, ScanLimitPolicy, ScanLimitService, ScanStatus};
