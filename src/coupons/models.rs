//! Database model for discount coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Coupon from booking_coupon.
///
/// The two usage arrays record every consuming identity; their combined
/// length must never exceed `max_uses`. The redeem query enforces that at
/// write time, so reading these fields only ever observes a consistent cap.
#[derive(Debug, Clone, FromRow)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount: Decimal,
    pub expires_at: DateTime<Utc>,
    pub max_uses: i32,
    pub user_ids_used: Vec<Uuid>,
    pub user_emails_used: Vec<String>,
}

impl Coupon {
    /// Total redemptions recorded so far.
    pub fn uses_recorded(&self) -> i32 {
        (self.user_ids_used.len() + self.user_emails_used.len()) as i32
    }
}
