//! POST /scan-limits

use axum::{extract::State, Json};
use reception_core::scan::ScanLimitEntry;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLimitRequest {
    pub year: i32,
    #[serde(default)]
    pub prison_numbers: Vec<String>,
}

pub async fn scan_limit_status(
    State(state): State<AppState>,
    Json(request): Json<ScanLimitRequest>,
) -> Result<Json<Vec<ScanLimitEntry>>, AppError> {
    let entries = state
        .scan_limits
        .scan_limit_status(request.year, &request.prison_numbers)
        .await?;
    Ok(Json(entries))
}
