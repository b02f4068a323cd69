//! Response DTOs for booking API endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::schedule::time::minutes_to_time;

use super::models::Booking;

/// Day-level capacity probe result
#[derive(Debug, Serialize)]
pub struct DayStatusResponse {
    pub date: NaiveDate,
    pub fully_booked: bool,
}

/// A committed booking, with derived display times alongside the record
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub start_slot: String,
    pub end_slot: String,
    #[serde(flatten)]
    pub booking: Booking,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            start_slot: minutes_to_time(booking.start_slot_minutes),
            end_slot: minutes_to_time(booking.end_slot_minutes),
            booking,
        }
    }
}
