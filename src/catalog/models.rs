//! Database models for the booking catalog.
//!
//! Read-only inputs to the booking core. Ownership of these records (CRUD,
//! images, admin UI) sits with the catalog service; the core only consumes
//! the fields that drive slot generation and pricing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Studio from booking_studio. `start_time`/`end_time` are "HH:MM" strings
/// bounding slot generation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Studio {
    pub id: Uuid,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Package joined with its category's minimum lead hours.
///
/// `is_fixed` selects flat-hourly pricing; otherwise the per-slot discount
/// schedule (see `pricing::models::SlotDiscount`) applies on top of `price`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub is_fixed: bool,
    pub category_id: Uuid,
    pub min_hours: i32,
}

/// Bookable add-on from booking_addon. `price` is the current catalog unit
/// price; booking lines snapshot it at commit time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AddOn {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub deleted_at: Option<DateTime<Utc>>,
}
