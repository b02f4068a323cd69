//! Database models for bookings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booking lifecycle state.
///
/// Bookings are never deleted; cancellation is a transition to `Canceled`,
/// which releases the slot for conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    New,
    Pending,
    Approved,
    Rejected,
    Canceled,
}

/// Booking from booking_booking.
///
/// `start_slot_minutes`/`end_slot_minutes` are authoritative for conflict
/// checks; the "HH:MM" forms are derived for display. `date` is stored as
/// UTC midnight and queried with half-open day bounds. All money fields are
/// server-computed at commit time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub studio_id: Uuid,
    pub package_id: Uuid,
    pub date: DateTime<Utc>,
    pub start_slot_minutes: i32,
    pub end_slot_minutes: i32,
    pub duration_hours: i32,
    pub status: BookingStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub coupon_code: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_package_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_add_ons_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price_after_discount: Decimal,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// One booked add-on line from booking_booking_addon.
///
/// `unit_price` is the catalog price captured at commit time; later catalog
/// changes never alter a booked line.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AddOnLine {
    pub add_on_id: Uuid,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}
