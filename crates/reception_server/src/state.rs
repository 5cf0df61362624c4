//! Shared handler state.

use std::sync::Arc;

use chrono::Duration;
use reception_core::booking::BookingService;
use reception_core::matching::MatchService;
use reception_core::ports::{IdentitySearchGateway, RecordStore};
use reception_core::scan::ScanLimitService;

#[derive(Clone)]
pub struct AppState {
    pub matching: Arc<MatchService>,
    pub bookings: BookingService,
    pub scan_limits: Arc<ScanLimitService>,
    /// Tolerance either side of an arrival timestamp when confirming it.
    pub arrival_tolerance: Duration,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn IdentitySearchGateway>,
        store: Arc<dyn RecordStore>,
        scan_limits: ScanLimitService,
    ) -> Self {
        Self {
            matching: Arc::new(MatchService::new(gateway)),
            bookings: BookingService::new(store),
            scan_limits: Arc::new(scan_limits),
            arrival_tolerance: Duration::hours(24),
        }
    }

    pub fn with_arrival_tolerance(mut self, tolerance: Duration) -> Self {
        self.arrival_tolerance = tolerance;
        self
    }
}
