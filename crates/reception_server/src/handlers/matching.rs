//! POST /match-prisoners

use axum::{extract::State, Json};
use reception_core::matching::{IdentityQuery, PrisonerMatch};

use crate::error::AppError;
use crate::state::AppState;

pub async fn match_prisoners(
    State(state): State<AppState>,
    Json(query): Json<IdentityQuery>,
) -> Result<Json<Vec<PrisonerMatch>>, AppError> {
    let matches = state.matching.match_identity(&query).await?;
    Ok(Json(matches))
}
