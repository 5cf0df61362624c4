//! Router construction for the reception server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/match-prisoners",
            post(handlers::matching::match_prisoners),
        )
        // Bookings
        .route("/bookings", post(handlers::bookings::record_booking))
        .route(
            "/bookings/duplicates",
            post(handlers::bookings::check_duplicate),
        )
        .route("/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/arrivals/confirm",
            post(handlers::bookings::confirm_arrival),
        )
        .route(
            "/prisons/:prison_id/roll-call",
            get(handlers::bookings::roll_call),
        )
        .route(
            "/prisons/:prison_id/roll-call/summary",
            get(handlers::bookings::roll_call_summary),
        )
        // Body scans
        .route(
            "/scan-limits",
            post(handlers::scan_limits::scan_limit_status),
        );

    let public = Router::new().route("/health", get(handlers::health::health));

    public
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
