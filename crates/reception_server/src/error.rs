//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reception_core::ReceptionError;
use serde_json::json;

/// Handler error: a core error rendered as a JSON body with the matching
/// status code.
#[derive(Debug)]
pub struct AppError(pub ReceptionError);

impl From<ReceptionError> for AppError {
    fn from(e: ReceptionError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        if let ReceptionError::Validation(errors) = &self.0 {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}
