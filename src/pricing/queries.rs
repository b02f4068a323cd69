//! Database queries for the pricing engine.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{PriceException, PriceRule, SlotDiscount};

/// Find the weekday rule for a package, preferring an exact weekday match
/// over the NULL wildcard.
pub async fn find_price_rule(
    pool: &PgPool,
    package_id: Uuid,
    weekday: i16,
) -> Result<Option<PriceRule>> {
    let rule = sqlx::query_as::<_, PriceRule>(
        r#"
        SELECT id, package_id, weekday, price, is_fixed
        FROM booking_price_rule
        WHERE package_id = $1
          AND (weekday = $2 OR weekday IS NULL)
        ORDER BY weekday NULLS LAST
        LIMIT 1
        "#,
    )
    .bind(package_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;

    Ok(rule)
}

/// Find the date exception for a package, if one exists
pub async fn find_price_exception(
    pool: &PgPool,
    package_id: Uuid,
    date: NaiveDate,
) -> Result<Option<PriceException>> {
    let exception = sqlx::query_as::<_, PriceException>(
        r#"
        SELECT id, package_id, date, price, is_fixed
        FROM booking_price_exception
        WHERE package_id = $1
          AND date = $2
        "#,
    )
    .bind(package_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(exception)
}

/// Insert a date exception for a package.
///
/// The unique index on (package_id, date) makes a second exception for the
/// same pair fail; that violation surfaces as a configuration error rather
/// than silently shadowing the first.
pub async fn insert_price_exception(
    pool: &PgPool,
    exception: &PriceException,
) -> Result<PriceException> {
    let inserted = sqlx::query_as::<_, PriceException>(
        r#"
        INSERT INTO booking_price_exception (id, package_id, date, price, is_fixed)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, package_id, date, price, is_fixed
        "#,
    )
    .bind(exception.id)
    .bind(exception.package_id)
    .bind(exception.date)
    .bind(exception.price)
    .bind(exception.is_fixed)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::InvalidConfiguration(
            format!(
                "price exception already exists for package {} on {}",
                exception.package_id, exception.date
            ),
        ),
        _ => AppError::Database(e),
    })?;

    Ok(inserted)
}

/// Get a package's per-slot discount schedule, ordered by slot index
pub async fn get_slot_discounts(pool: &PgPool, package_id: Uuid) -> Result<Vec<SlotDiscount>> {
    let discounts = sqlx::query_as::<_, SlotDiscount>(
        r#"
        SELECT slot_index, discount_percent
        FROM booking_package_slot_discount
        WHERE package_id = $1
        ORDER BY slot_index
        "#,
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;

    Ok(discounts)
}
