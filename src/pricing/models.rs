//! Database models for the pricing engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Weekday-scoped pricing override for a package.
///
/// `weekday` is 0-6 with 0 = Sunday, matching the stored booking calendar;
/// NULL is a wildcard applying to every weekday and loses to an exact match.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceRule {
    pub id: Uuid,
    pub package_id: Uuid,
    pub weekday: Option<i16>,
    pub price: Decimal,
    pub is_fixed: bool,
}

/// Date-scoped pricing override for a package.
///
/// Takes precedence over any weekday rule. At most one exception may exist
/// per (package, date); the database rejects a second.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceException {
    pub id: Uuid,
    pub package_id: Uuid,
    pub date: NaiveDate,
    pub price: Decimal,
    pub is_fixed: bool,
}

/// One entry of a package's per-slot discount schedule.
///
/// `slot_index` is 1-based: the first priced hour of a session is slot 1.
/// Hours without an entry carry no discount.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SlotDiscount {
    pub slot_index: i32,
    pub discount_percent: Decimal,
}

/// Fully resolved pricing inputs for one package on one date.
///
/// Produced by the exception -> rule -> package-default precedence chain and
/// consumed by the slot-price walk.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    pub price_per_slot: Decimal,
    pub is_fixed_hourly: bool,
    pub per_slot_discounts: Vec<SlotDiscount>,
}
