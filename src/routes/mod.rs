//! HTTP route table.
//!
//! Thin adapters over the booking core; no business logic lives here.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub mod booking;
pub mod pricing;

/// Build the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/availability/slots", get(booking::available_slots))
        .route("/api/availability/day-status", get(booking::day_status))
        .route("/api/pricing/slots", get(pricing::slot_prices))
        .route("/api/pricing/exceptions", post(pricing::create_exception))
        .route("/api/bookings", post(booking::create))
        .route("/api/bookings/:id/status", patch(booking::update_status))
}
