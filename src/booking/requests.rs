//! Request DTOs for booking API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Request to create a booking.
///
/// Every money field here is the client's *claim*; the commit service
/// recomputes all of them from the catalog and rejects on any mismatch.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub studio_id: Uuid,
    pub package_id: Uuid,
    pub date: NaiveDate,
    pub start_slot: String,
    pub end_slot: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub add_ons: Vec<AddOnLineRequest>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_package_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_add_ons_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price_after_discount: Decimal,
}

/// One requested add-on line. Quantity is client-chosen; the unit price is
/// always taken from the current catalog.
#[derive(Debug, Deserialize)]
pub struct AddOnLineRequest {
    pub add_on_id: Uuid,
    pub quantity: i32,
}

/// Query parameters for the available-slots endpoint
#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub studio_id: Uuid,
    pub date: NaiveDate,
    pub duration: i32,
}

/// Query parameters for the slot-prices endpoint
#[derive(Debug, Deserialize)]
pub struct SlotPricesQuery {
    pub studio_id: Uuid,
    pub package_id: Uuid,
    pub date: NaiveDate,
    pub start: String,
}

/// Request to change a booking's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: super::models::BookingStatus,
}
