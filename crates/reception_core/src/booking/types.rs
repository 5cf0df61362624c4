//! Booking record types.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldError, ReceptionError};

/// What kind of movement a booking confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArrivalType {
    NewToPrison,
    NewBookingExisting,
    CurrentBooking,
    CourtTransfer,
    PrisonTransfer,
    TemporaryAbsenceReturn,
    CourtReturn,
}

impl ArrivalType {
    pub const ALL: [ArrivalType; 7] = [
        Self::NewToPrison,
        Self::NewBookingExisting,
        Self::CurrentBooking,
        Self::CourtTransfer,
        Self::PrisonTransfer,
        Self::TemporaryAbsenceReturn,
        Self::CourtReturn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewToPrison => "NEW_TO_PRISON",
            Self::NewBookingExisting => "NEW_BOOKING_EXISTING",
            Self::CurrentBooking => "CURRENT_BOOKING",
            Self::CourtTransfer => "COURT_TRANSFER",
            Self::PrisonTransfer => "PRISON_TRANSFER",
            Self::TemporaryAbsenceReturn => "TEMPORARY_ABSENCE_RETURN",
            Self::CourtReturn => "COURT_RETURN",
        }
    }
}

impl std::fmt::Display for ArrivalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArrivalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown arrival type '{s}'"))
    }
}

/// The four identifiers that make two bookings "the same event".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingKey {
    pub prison_id: String,
    pub movement_id: String,
    pub prisoner_id: String,
    pub booking_id: String,
}

impl BookingKey {
    pub fn new(
        prison_id: impl Into<String>,
        movement_id: impl Into<String>,
        prisoner_id: impl Into<String>,
        booking_id: impl Into<String>,
    ) -> Self {
        Self {
            prison_id: prison_id.into(),
            movement_id: movement_id.into(),
            prisoner_id: prisoner_id.into(),
            booking_id: booking_id.into(),
        }
    }
}

/// A confirmed arrival or movement. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Unset until the record store assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub key: BookingKey,
    pub arrival_type: ArrivalType,
    pub timestamp: DateTime<Utc>,
}

impl BookingRecord {
    pub fn new(key: BookingKey, arrival_type: ArrivalType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            key,
            arrival_type,
            timestamp,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Calendar date of the booking, in UTC.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Closed timestamp interval `[from, to]` chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DedupWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DedupWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, ReceptionError> {
        if from > to {
            return Err(ReceptionError::Validation(vec![FieldError::new(
                "window",
                "Window start must not be after window end",
            )]));
        }
        Ok(Self { from, to })
    }

    /// `[at - tolerance, at + tolerance]`. A negative tolerance is treated as zero.
    ///
    /// Fails on field `timestamp` when either bound is outside the
    /// representable range.
    pub fn around(at: DateTime<Utc>, tolerance: Duration) -> Result<Self, ReceptionError> {
        let tolerance = tolerance.max(Duration::zero());
        match (
            at.checked_sub_signed(tolerance),
            at.checked_add_signed(tolerance),
        ) {
            (Some(from), Some(to)) => Ok(Self { from, to }),
            _ => Err(ReceptionError::Validation(vec![FieldError::new(
                "timestamp",
                "Timestamp is too far from the present to check for duplicates",
            )])),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.to
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}
