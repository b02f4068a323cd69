//! Booking services: availability reads and the conflict-safe commit.
//!
//! Reads work against a snapshot of the day's busy set and tolerate
//! staleness; the commit path re-checks everything inside a per-date
//! critical section before writing. A booking request that fails any step
//! aborts with no partial state.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::catalog;
use crate::coupons::{self, Redeemer};
use crate::error::{AppError, Result};
use crate::notifications;
use crate::pricing::{self, round_money};
use crate::schedule::availability::{available_start_slots, next_half_hour, AvailableSlot};
use crate::schedule::intervals::{has_free_interval, merge_intervals, overlaps_any};
use crate::schedule::time::{time_to_minutes, MINUTES_PER_DAY};

use super::models::{AddOnLine, Booking, BookingStatus};
use super::queries;
use super::requests::CreateBookingRequest;

/// The four server-computed money fields of a booking, used for the
/// anti-tampering comparison against the client's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTotals {
    pub package: Decimal,
    pub add_ons: Decimal,
    pub total: Decimal,
    pub total_after_discount: Decimal,
}

/// Parse and validate a submitted start/end slot pair.
///
/// Sessions never cross midnight: the end slot must stay within the day,
/// strictly after the start, and span whole hours.
pub fn parse_slot_span(start_slot: &str, end_slot: &str) -> Result<(i32, i32, i32)> {
    let start = time_to_minutes(start_slot)?;
    let end = time_to_minutes(end_slot)?;

    if end > MINUTES_PER_DAY {
        return Err(AppError::InvalidInput("session may not cross midnight".to_string()));
    }
    if end <= start {
        return Err(AppError::InvalidInput(format!(
            "end slot {} is not after start slot {}",
            end_slot, start_slot
        )));
    }
    if (end - start) % 60 != 0 {
        return Err(AppError::InvalidInput("session must span whole hours".to_string()));
    }

    Ok((start, end, (end - start) / 60))
}

/// Compare client-submitted totals against the server recomputation.
///
/// Client numbers are advisory only; the first mismatch (after cent
/// rounding) rejects the booking.
pub fn verify_totals(server: &BookingTotals, client: &BookingTotals) -> Result<()> {
    let fields: [(&'static str, Decimal, Decimal); 4] = [
        ("total_package_price", server.package, client.package),
        ("total_add_ons_price", server.add_ons, client.add_ons),
        ("total_price", server.total, client.total),
        (
            "total_price_after_discount",
            server.total_after_discount,
            client.total_after_discount,
        ),
    ];

    for (field, ours, theirs) in fields {
        if round_money(ours, 2) != round_money(theirs, 2) {
            tracing::warn!(
                "Price mismatch on {}: server computed {}, client sent {}",
                field,
                ours,
                theirs
            );
            return Err(AppError::PriceMismatch { field });
        }
    }

    Ok(())
}

fn minutes_of_day(now: DateTime<Utc>) -> i32 {
    (now.hour() * 60 + now.minute()) as i32
}

/// List every bookable start slot for a date and duration (hours).
///
/// Reads the aggregate busy set across all studios; the studio only
/// contributes its working window.
pub async fn available_slots(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
    date: NaiveDate,
    duration_hours: i32,
    now: DateTime<Utc>,
) -> Result<Vec<AvailableSlot>> {
    let studio = catalog::services::get_studio(pool, cache, studio_id).await?;
    let work_start = time_to_minutes(&studio.start_time)?;
    let work_end = time_to_minutes(&studio.end_time)?;

    // No retroactive starts when booking for today
    let min_start = if date == now.date_naive() {
        Some(next_half_hour(minutes_of_day(now)))
    } else {
        None
    };

    let busy = queries::busy_intervals_for_date(pool, date, None).await?;

    available_start_slots(work_start, work_end, duration_hours * 60, min_start, busy)
}

/// Whether a date still has any free gap of the given duration (hours).
pub async fn day_has_capacity(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
    date: NaiveDate,
    duration_hours: i32,
) -> Result<bool> {
    if duration_hours <= 0 {
        return Err(AppError::InvalidInput("duration must be positive".to_string()));
    }

    let studio = catalog::services::get_studio(pool, cache, studio_id).await?;
    let work_start = time_to_minutes(&studio.start_time)?;
    let work_end = time_to_minutes(&studio.end_time)?;

    if work_end <= work_start {
        return Err(AppError::InvalidConfiguration(format!(
            "studio {} working hours are inverted",
            studio.id
        )));
    }

    let busy = queries::busy_intervals_for_date(pool, date, None).await?;

    Ok(has_free_interval(busy, work_start, work_end, duration_hours * 60))
}

/// Create a booking: validate, recompute prices server-side, re-check for
/// conflicts inside the per-date critical section, and persist atomically.
///
/// Post-commit notification is best-effort; a delivery failure is logged
/// and never rolls back the booking.
pub async fn create_booking(
    pool: &PgPool,
    cache: &AppCache,
    req: CreateBookingRequest,
    now: DateTime<Utc>,
) -> Result<Booking> {
    // Validating: the studio and package must exist
    let studio = catalog::services::get_studio(pool, cache, req.studio_id).await?;
    let package = catalog::services::get_package(pool, cache, req.package_id).await?;

    let (start_minutes, end_minutes, duration_hours) =
        parse_slot_span(&req.start_slot, &req.end_slot)?;

    // Fast-path conflict check on an unlocked snapshot. The price walk below
    // never leaves the requested span, so once this span is clear the walk
    // cannot be cut short by a busy interval; the authoritative re-check
    // happens under the advisory lock before the insert.
    let snapshot =
        merge_intervals(queries::busy_intervals_for_date(pool, req.date, None).await?);
    if overlaps_any(start_minutes, end_minutes, &snapshot) {
        return Err(AppError::SlotConflict);
    }

    // PriceVerified: recompute every total from the catalog
    let policy = pricing::resolve_pricing_policy(pool, &package, req.date).await?;
    let lead_minutes = package.min_hours * 60;
    let prices =
        pricing::walk_slot_prices(&policy, start_minutes, lead_minutes, end_minutes, &snapshot);

    let package_total = match prices.last() {
        Some(last) if last.end_minutes == end_minutes => last.total_price,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "requested span is shorter than the package's {}-hour minimum",
                package.min_hours
            )))
        }
    };

    let mut add_on_lines = Vec::with_capacity(req.add_ons.len());
    let mut add_ons_total = Decimal::ZERO;
    for line in &req.add_ons {
        if line.quantity <= 0 {
            return Err(AppError::InvalidInput("add-on quantity must be positive".to_string()));
        }
        let add_on = catalog::services::get_add_on(pool, cache, line.add_on_id).await?;
        add_ons_total += add_on.price * Decimal::from(line.quantity);
        add_on_lines.push(AddOnLine {
            add_on_id: add_on.id,
            quantity: line.quantity,
            unit_price: add_on.price,
        });
    }

    let total = package_total + add_ons_total;

    // Coupon validation consumes one use; a capped coupon cannot be oversold
    let total_after_discount = match &req.coupon_code {
        Some(code) => {
            let redeemer = Redeemer::Email(req.customer_email.clone());
            let discount = coupons::redeem(pool, code, &redeemer, now).await?;
            round_money(total * (Decimal::ONE - discount / dec!(100)), 2)
        }
        None => total,
    };
    debug_assert!(total_after_discount <= total);

    let server = BookingTotals {
        package: package_total,
        add_ons: add_ons_total,
        total,
        total_after_discount,
    };
    let client = BookingTotals {
        package: req.total_package_price,
        add_ons: req.total_add_ons_price,
        total: req.total_price,
        total_after_discount: req.total_price_after_discount,
    };
    verify_totals(&server, &client)?;

    // Critical section: conflict re-check and insert share the transaction
    // holding the per-date advisory lock. Nothing inside it acquires a
    // second pool connection.
    let mut tx = queries::begin_commit(pool, req.date).await?;

    let busy = merge_intervals(queries::busy_intervals_for_date(&mut *tx, req.date, None).await?);
    if overlaps_any(start_minutes, end_minutes, &busy) {
        return Err(AppError::SlotConflict);
    }

    // Persisted
    let booking = Booking {
        id: Uuid::new_v4(),
        studio_id: studio.id,
        package_id: package.id,
        date: crate::schedule::time::day_bounds(req.date).0,
        start_slot_minutes: start_minutes,
        end_slot_minutes: end_minutes,
        duration_hours,
        status: BookingStatus::Pending,
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        coupon_code: req.coupon_code,
        total_package_price: server.package,
        total_add_ons_price: server.add_ons,
        total_price: server.total,
        total_price_after_discount: server.total_after_discount,
        assigned_to: None,
        created_at: now,
    };

    let booking = queries::insert_booking(&mut tx, &booking, &add_on_lines).await?;
    tx.commit().await?;

    tracing::info!(
        "Booking {} committed: {} {}-{}",
        booking.id,
        req.date,
        req.start_slot,
        req.end_slot
    );

    // Side effects only after a durable write, and never fatal
    if let Err(e) = notifications::booking_created(&booking).await {
        tracing::warn!("Post-commit notification failed for booking {}: {}", booking.id, e);
    }

    Ok(booking)
}

/// Transition a booking's status. Cancellation frees the slot; the record
/// itself is never deleted.
pub async fn update_status(
    pool: &PgPool,
    booking_id: Uuid,
    status: BookingStatus,
) -> Result<Booking> {
    let booking = queries::update_status(pool, booking_id, status).await?;
    tracing::info!("Booking {} status changed to {:?}", booking.id, status);
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_slot_span tests ====================

    #[test]
    fn test_span_valid() {
        assert_eq!(parse_slot_span("10:00", "12:00").unwrap(), (600, 720, 2));
    }

    #[test]
    fn test_span_end_before_start() {
        assert!(matches!(
            parse_slot_span("12:00", "10:00").unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_span_zero_length() {
        assert!(parse_slot_span("10:00", "10:00").is_err());
    }

    #[test]
    fn test_span_partial_hour() {
        assert!(parse_slot_span("10:00", "11:30").is_err());
    }

    #[test]
    fn test_span_malformed_time() {
        assert!(parse_slot_span("soon", "12:00").is_err());
    }

    // ==================== verify_totals tests ====================

    fn totals(package: Decimal, add_ons: Decimal, discount_pct: Decimal) -> BookingTotals {
        let total = package + add_ons;
        BookingTotals {
            package,
            add_ons,
            total,
            total_after_discount: round_money(total * (Decimal::ONE - discount_pct / dec!(100)), 2),
        }
    }

    #[test]
    fn test_totals_exact_match_passes() {
        let t = totals(dec!(1900), dec!(250), dec!(20));
        assert!(verify_totals(&t, &t.clone()).is_ok());
    }

    #[test]
    fn test_totals_tampered_add_ons_rejected() {
        // Client lowballs the add-on total but keeps its grand total
        // self-consistent; the per-field compare still catches it
        let server = totals(dec!(1900), dec!(250), dec!(0));
        let mut client = server.clone();
        client.add_ons = dec!(25);
        let err = verify_totals(&server, &client).unwrap_err();
        assert!(matches!(err, AppError::PriceMismatch { field: "total_add_ons_price" }));
    }

    #[test]
    fn test_totals_tampered_discount_rejected() {
        let server = totals(dec!(1000), dec!(0), dec!(10));
        let mut client = server.clone();
        client.total_after_discount = dec!(500);
        let err = verify_totals(&server, &client).unwrap_err();
        assert!(matches!(err, AppError::PriceMismatch { field: "total_price_after_discount" }));
    }

    #[test]
    fn test_totals_rounding_differences_tolerated() {
        // Sub-cent representation differences are not tampering
        let server = totals(dec!(666.99333), dec!(0), dec!(0));
        let mut client = server.clone();
        client.package = dec!(666.993);
        client.total = dec!(666.993);
        client.total_after_discount = dec!(666.99);
        assert!(verify_totals(&server, &client).is_ok());
    }
}
