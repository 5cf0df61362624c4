//! Booking handlers.
//!
//! POST /bookings/duplicates               - existing bookings inside a window
//! POST /bookings                          - record a booking
//! POST /arrivals/confirm                  - record unless already recorded
//! GET  /bookings/:id                      - fetch one booking
//! GET  /prisons/:prison_id/roll-call      - the day's bookings
//! GET  /prisons/:prison_id/roll-call/summary

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use reception_core::booking::{
    ArrivalOutcome, ArrivalType, BookingKey, BookingRecord, DedupWindow, RollCallSummary,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckRequest {
    #[serde(flatten)]
    pub key: BookingKey,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    #[serde(flatten)]
    pub key: BookingKey,
    pub arrival_type: ArrivalType,
    /// Defaults to the time the request is handled.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewBookingRequest {
    fn into_record(self) -> BookingRecord {
        BookingRecord::new(
            self.key,
            self.arrival_type,
            self.timestamp.unwrap_or_else(Utc::now),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct RollCallQuery {
    pub date: NaiveDate,
}

pub async fn check_duplicate(
    State(state): State<AppState>,
    Json(request): Json<DuplicateCheckRequest>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    let window = DedupWindow::new(request.from, request.to)?;
    let existing = state
        .bookings
        .check_duplicate(&request.key, &window)
        .await?;
    Ok(Json(existing))
}

pub async fn record_booking(
    State(state): State<AppState>,
    Json(request): Json<NewBookingRequest>,
) -> Result<Response, AppError> {
    let id = state.bookings.record_booking(request.into_record()).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

pub async fn confirm_arrival(
    State(state): State<AppState>,
    Json(request): Json<NewBookingRequest>,
) -> Result<Response, AppError> {
    let outcome = state
        .bookings
        .confirm_arrival(request.into_record(), state.arrival_tolerance)
        .await?;

    Ok(match outcome {
        ArrivalOutcome::Recorded(id) => {
            (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
        }
        ArrivalOutcome::AlreadyRecorded(existing) => (
            StatusCode::OK,
            Json(json!({ "alreadyRecorded": existing })),
        )
            .into_response(),
    })
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingRecord>, AppError> {
    Ok(Json(state.bookings.find_booking(id).await?))
}

pub async fn roll_call(
    State(state): State<AppState>,
    Path(prison_id): Path<String>,
    Query(query): Query<RollCallQuery>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    Ok(Json(state.bookings.roll_call(query.date, &prison_id).await?))
}

pub async fn roll_call_summary(
    State(state): State<AppState>,
    Path(prison_id): Path<String>,
    Query(query): Query<RollCallQuery>,
) -> Result<Json<RollCallSummary>, AppError> {
    Ok(Json(
        state
            .bookings
            .roll_call_summary(query.date, &prison_id)
            .await?,
    ))
}
