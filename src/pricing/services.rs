//! Pricing service functions with database access.
//!
//! These resolve the applicable policy for a package and date, then run the
//! pure slot-price walk against the day's booked intervals.

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::booking;
use crate::cache::AppCache;
use crate::catalog::{self, Package};
use crate::error::Result;
use crate::schedule::intervals::merge_intervals;
use crate::schedule::time::time_to_minutes;

use super::calculators::{resolve_policy, walk_slot_prices, SlotPrice};
use super::models::PricingPolicy;
use super::queries;

/// Weekday as stored on price rules: 0 = Sunday .. 6 = Saturday.
fn rule_weekday(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Resolve the pricing policy for a package on a date.
///
/// Looks up the date exception first, then the weekday rule (exact weekday
/// beating the NULL wildcard), then falls back to the package's own price.
pub async fn resolve_pricing_policy(
    pool: &PgPool,
    package: &Package,
    date: NaiveDate,
) -> Result<PricingPolicy> {
    let discounts = queries::get_slot_discounts(pool, package.id).await?;
    let exception = queries::find_price_exception(pool, package.id, date).await?;

    // Rule lookup is skipped when an exception already decides the day
    let rule = if exception.is_none() {
        queries::find_price_rule(pool, package.id, rule_weekday(date)).await?
    } else {
        None
    };

    Ok(resolve_policy(package, discounts, rule.as_ref(), exception.as_ref()))
}

/// Price every reachable end time for a session starting at `start_time`.
///
/// The walk is bounded by the studio's closing time and stops at the first
/// already-booked interval. The last entry is the authoritative total for
/// the full span; intermediate entries price shorter end-time choices.
pub async fn quote_slot_prices(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
    package_id: Uuid,
    date: NaiveDate,
    start_time: &str,
) -> Result<Vec<SlotPrice>> {
    let studio = catalog::services::get_studio(pool, cache, studio_id).await?;
    let package = catalog::services::get_package(pool, cache, package_id).await?;

    let start_minutes = time_to_minutes(start_time)?;
    let work_end = time_to_minutes(&studio.end_time)?;
    let lead_minutes = package.min_hours * 60;

    let busy = merge_intervals(booking::queries::busy_intervals_for_date(pool, date, None).await?);
    let policy = resolve_pricing_policy(pool, &package, date).await?;

    Ok(walk_slot_prices(&policy, start_minutes, lead_minutes, work_end, &busy))
}
