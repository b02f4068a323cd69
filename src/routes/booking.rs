//! Booking route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::booking::requests::{AvailableSlotsQuery, CreateBookingRequest, UpdateStatusRequest};
use crate::booking::responses::{BookingResponse, DayStatusResponse};
use crate::booking::services;
use crate::error::Result;
use crate::schedule::availability::AvailableSlot;
use crate::AppState;

/// Bookable start slots for a date and duration
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<AvailableSlot>>> {
    let slots = services::available_slots(
        &state.db,
        &state.cache,
        query.studio_id,
        query.date,
        query.duration,
        Utc::now(),
    )
    .await?;

    Ok(Json(slots))
}

/// Day-level fully-booked probe
pub async fn day_status(
    State(state): State<AppState>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<DayStatusResponse>> {
    let has_capacity = services::day_has_capacity(
        &state.db,
        &state.cache,
        query.studio_id,
        query.date,
        query.duration,
    )
    .await?;

    Ok(Json(DayStatusResponse {
        date: query.date,
        fully_booked: !has_capacity,
    }))
}

/// Create a booking
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let booking = services::create_booking(&state.db, &state.cache, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Change a booking's lifecycle status (cancellation included)
pub async fn update_status(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>> {
    let booking = services::update_status(&state.db, booking_id, req.status).await?;
    Ok(Json(booking.into()))
}
