//! Coupon validation and redemption.
//!
//! Validation and the usage-list mutation are one call: a coupon that
//! validates is immediately consumed by the guarded update in
//! `queries::try_redeem`, so a capped coupon can never be oversold by
//! concurrent requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::Coupon;
use super::queries;

/// Who is consuming the coupon; recorded in the matching usage list.
#[derive(Debug, Clone)]
pub enum Redeemer {
    User(Uuid),
    Email(String),
}

/// Pure validity check against a coupon snapshot.
///
/// The write path re-enforces both conditions inside the UPDATE guard; this
/// exists for pre-flight checks and to classify a failed redemption.
pub fn check_coupon(coupon: &Coupon, now: DateTime<Utc>) -> Result<()> {
    if coupon.expires_at < now {
        return Err(AppError::CouponExpired);
    }
    if coupon.uses_recorded() >= coupon.max_uses {
        return Err(AppError::CouponUsageExceeded);
    }
    Ok(())
}

/// Validate a coupon and record the redemption atomically.
///
/// Returns the discount percent. A guard miss is re-fetched once to report
/// the precise failure: absent code, expired, or cap reached.
pub async fn redeem(
    pool: &PgPool,
    code: &str,
    redeemer: &Redeemer,
    now: DateTime<Utc>,
) -> Result<Decimal> {
    let (user_id, user_email) = match redeemer {
        Redeemer::User(id) => (Some(*id), None),
        Redeemer::Email(email) => (None, Some(email.as_str())),
    };

    if let Some(discount) = queries::try_redeem(pool, code, user_id, user_email, now).await? {
        return Ok(discount);
    }

    // Guard missed: classify from the current row
    let coupon = queries::find_coupon(pool, code).await?.ok_or(AppError::NotFound)?;
    check_coupon(&coupon, now)?;

    // Row satisfied the checks on re-read; a concurrent redeem must have won
    // and freed up nothing. Report the cap.
    Err(AppError::CouponUsageExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn coupon(max_uses: i32, emails_used: usize, expires_in_hours: i64) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            code: "LAUNCH20".to_string(),
            discount: dec!(20),
            expires_at: Utc::now() + Duration::hours(expires_in_hours),
            max_uses,
            user_ids_used: vec![],
            user_emails_used: (0..emails_used).map(|i| format!("user{}@test.dev", i)).collect(),
        }
    }

    #[test]
    fn test_valid_coupon_passes() {
        assert!(check_coupon(&coupon(5, 2, 24), Utc::now()).is_ok());
    }

    #[test]
    fn test_expired_coupon_rejected() {
        let err = check_coupon(&coupon(5, 0, -1), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::CouponExpired));
    }

    #[test]
    fn test_usage_cap_rejected() {
        let err = check_coupon(&coupon(2, 2, 24), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::CouponUsageExceeded));
    }

    #[test]
    fn test_uses_recorded_counts_both_lists() {
        let mut c = coupon(10, 3, 24);
        c.user_ids_used = vec![Uuid::new_v4(), Uuid::new_v4()];
        assert_eq!(c.uses_recorded(), 5);
    }

    #[test]
    fn test_expiry_checked_before_cap() {
        // An expired, fully-used coupon reports expiry first
        let err = check_coupon(&coupon(1, 1, -1), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::CouponExpired));
    }
}
