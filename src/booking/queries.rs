//! Database queries for bookings.
//!
//! The conflict check and the insert share one transaction that first takes
//! a per-date advisory lock, so two concurrent commits for overlapping
//! intervals serialize at the database. A partial unique index on
//! (date, start_slot_minutes, end_slot_minutes) backstops the lock for the
//! exact-duplicate case.

use chrono::{Datelike, NaiveDate};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::schedule::intervals::Interval;
use crate::schedule::time::day_bounds;

use super::models::{AddOnLine, Booking, BookingStatus};

/// Advisory-lock namespace for booking commits.
const BOOKING_LOCK_CLASS: i32 = 0x424b;

/// Lock key for one calendar date.
fn date_lock_key(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

/// Busy intervals for a date across *all* studios (shared session pool),
/// excluding canceled bookings and optionally one booking id (edit flows).
pub async fn busy_intervals_for_date<'e, E>(
    executor: E,
    date: NaiveDate,
    exclude_booking_id: Option<Uuid>,
) -> Result<Vec<Interval>>
where
    E: sqlx::PgExecutor<'e>,
{
    let (day_start, day_end) = day_bounds(date);

    let rows = sqlx::query_as::<_, (i32, i32)>(
        r#"
        SELECT start_slot_minutes, end_slot_minutes
        FROM booking_booking
        WHERE date >= $1
          AND date < $2
          AND status <> 'canceled'
          AND ($3::uuid IS NULL OR id <> $3)
        "#,
    )
    .bind(day_start)
    .bind(day_end)
    .bind(exclude_booking_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(|(start, end)| Interval::new(start, end)).collect())
}

/// Open the commit critical section for one date.
///
/// `pg_advisory_xact_lock` holds until the transaction ends, covering both
/// the conflict re-check and the insert.
pub async fn begin_commit(pool: &PgPool, date: NaiveDate) -> Result<Transaction<'_, Postgres>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(BOOKING_LOCK_CLASS)
        .bind(date_lock_key(date))
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

/// Insert a booking and its add-on lines inside the commit transaction.
pub async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    booking: &Booking,
    add_ons: &[AddOnLine],
) -> Result<Booking> {
    let inserted = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO booking_booking (
            id, studio_id, package_id, date,
            start_slot_minutes, end_slot_minutes, duration_hours,
            status, customer_name, customer_email, coupon_code,
            total_package_price, total_add_ons_price,
            total_price, total_price_after_discount,
            assigned_to, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING
            id, studio_id, package_id, date,
            start_slot_minutes, end_slot_minutes, duration_hours,
            status, customer_name, customer_email, coupon_code,
            total_package_price, total_add_ons_price,
            total_price, total_price_after_discount,
            assigned_to, created_at
        "#,
    )
    .bind(booking.id)
    .bind(booking.studio_id)
    .bind(booking.package_id)
    .bind(booking.date)
    .bind(booking.start_slot_minutes)
    .bind(booking.end_slot_minutes)
    .bind(booking.duration_hours)
    .bind(booking.status)
    .bind(&booking.customer_name)
    .bind(&booking.customer_email)
    .bind(&booking.coupon_code)
    .bind(booking.total_package_price)
    .bind(booking.total_add_ons_price)
    .bind(booking.total_price)
    .bind(booking.total_price_after_discount)
    .bind(booking.assigned_to)
    .bind(booking.created_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| match &e {
        // Exact-duplicate slot raced past the advisory lock path (e.g. a
        // writer that bypassed begin_commit); the unique index catches it
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::SlotConflict,
        _ => AppError::Database(e),
    })?;

    for line in add_ons {
        sqlx::query(
            r#"
            INSERT INTO booking_booking_addon (booking_id, add_on_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(booking.id)
        .bind(line.add_on_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .execute(&mut **tx)
        .await?;
    }

    Ok(inserted)
}

/// Get a booking by id
pub async fn get_booking(pool: &PgPool, booking_id: Uuid) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, studio_id, package_id, date,
            start_slot_minutes, end_slot_minutes, duration_hours,
            status, customer_name, customer_email, coupon_code,
            total_package_price, total_add_ons_price,
            total_price, total_price_after_discount,
            assigned_to, created_at
        FROM booking_booking
        WHERE id = $1
        "#,
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(booking)
}

/// Update a booking's lifecycle status
pub async fn update_status(
    pool: &PgPool,
    booking_id: Uuid,
    status: BookingStatus,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE booking_booking
        SET status = $2
        WHERE id = $1
        RETURNING
            id, studio_id, package_id, date,
            start_slot_minutes, end_slot_minutes, duration_hours,
            status, customer_name, customer_email, coupon_code,
            total_package_price, total_add_ons_price,
            total_price, total_price_after_discount,
            assigned_to, created_at
        "#,
    )
    .bind(booking_id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(booking)
}
