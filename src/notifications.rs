//! Post-commit notification dispatch.
//!
//! Confirmation email, calendar sync and CRM updates are delivered by
//! out-of-process workers; this module only emits the dispatch record they
//! consume. Dispatch runs strictly after a durable commit and is
//! best-effort: a failure here is logged by the caller and never surfaces
//! as a booking failure.

use serde::Serialize;

use crate::booking::Booking;
use crate::schedule::time::minutes_to_time;

/// Dispatch record for a newly committed booking.
#[derive(Debug, Serialize)]
struct BookingCreatedEvent<'a> {
    booking_id: uuid::Uuid,
    customer_email: &'a str,
    date: chrono::DateTime<chrono::Utc>,
    start_slot: String,
    end_slot: String,
}

/// Announce a committed booking to the notification workers.
pub async fn booking_created(booking: &Booking) -> anyhow::Result<()> {
    let event = BookingCreatedEvent {
        booking_id: booking.id,
        customer_email: &booking.customer_email,
        date: booking.date,
        start_slot: minutes_to_time(booking.start_slot_minutes),
        end_slot: minutes_to_time(booking.end_slot_minutes),
    };

    tracing::info!(target: "notifications", "booking.created {}", serde_json::to_string(&event)?);
    Ok(())
}
