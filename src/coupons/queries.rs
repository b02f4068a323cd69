//! Database queries for coupon validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::models::Coupon;

/// Get a coupon by code, if present
pub async fn find_coupon(pool: &PgPool, code: &str) -> Result<Option<Coupon>> {
    let coupon = sqlx::query_as::<_, Coupon>(
        r#"
        SELECT id, code, discount, expires_at, max_uses, user_ids_used, user_emails_used
        FROM booking_coupon
        WHERE code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(coupon)
}

/// Record one redemption, guarded at write time.
///
/// The usage cap and expiry live in the WHERE clause, so two racing
/// redemptions of a coupon with one use left resolve at the database: the
/// second UPDATE matches zero rows. Returns the discount percent when the
/// redemption was recorded.
pub async fn try_redeem(
    pool: &PgPool,
    code: &str,
    user_id: Option<Uuid>,
    user_email: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Decimal>> {
    let discount = sqlx::query_scalar::<_, Decimal>(
        r#"
        UPDATE booking_coupon
        SET user_ids_used = CASE
                WHEN $2::uuid IS NOT NULL THEN array_append(user_ids_used, $2)
                ELSE user_ids_used
            END,
            user_emails_used = CASE
                WHEN $3::text IS NOT NULL THEN array_append(user_emails_used, $3)
                ELSE user_emails_used
            END
        WHERE code = $1
          AND expires_at >= $4
          AND cardinality(user_ids_used) + cardinality(user_emails_used) < max_uses
        RETURNING discount
        "#,
    )
    .bind(code)
    .bind(user_id)
    .bind(user_email)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(discount)
}
