//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access. Policy resolution
//! and the hour-by-hour price walk both live here so they can be tested
//! without a running Postgres.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::Package;
use crate::schedule::intervals::{overlaps_any, Interval};
use crate::schedule::time::{minutes_to_time, MINUTES_PER_DAY};

use super::models::{PriceException, PriceRule, PricingPolicy, SlotDiscount};

/// Length of one pricing step. Availability steps at 30 minutes, but price
/// accumulates per whole hour.
pub const PRICING_SLOT_MINUTES: i32 = 60;

/// Cumulative price at one hour boundary of the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotPrice {
    pub end_time: String,
    pub end_minutes: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use podstudio_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Resolve the pricing policy for a package on one date.
///
/// Precedence, highest first: date exception, weekday rule, package default.
/// The per-slot discount schedule always comes from the package; overrides
/// replace the base price and the fixed/variable flag only.
pub fn resolve_policy(
    package: &Package,
    per_slot_discounts: Vec<SlotDiscount>,
    rule: Option<&PriceRule>,
    exception: Option<&PriceException>,
) -> PricingPolicy {
    let (price_per_slot, is_fixed_hourly) = if let Some(exc) = exception {
        (exc.price, exc.is_fixed)
    } else if let Some(rule) = rule {
        (rule.price, rule.is_fixed)
    } else {
        (package.price, package.is_fixed)
    };

    PricingPolicy {
        price_per_slot,
        is_fixed_hourly,
        per_slot_discounts,
    }
}

/// Discount percent for a 1-based slot index; absent entries mean no discount.
fn discount_for_slot(discounts: &[SlotDiscount], slot_index: i32) -> Decimal {
    discounts
        .iter()
        .find(|d| d.slot_index == slot_index)
        .map(|d| d.discount_percent)
        .unwrap_or(Decimal::ZERO)
}

/// Walk forward hour-by-hour from a start time, accumulating price.
///
/// The walk begins at `start_minutes + lead_minutes` (the category's minimum
/// lead converts shorter spans into dead time before pricing starts) and
/// emits one cumulative entry per completed hour, so the caller can present
/// a price for any chosen end time. It stops without emitting when the next
/// hour slot would overlap a busy interval or run past `day_end_minutes`
/// (never past midnight).
///
/// Booking creation uses the *last* entry as the authoritative total for the
/// full requested duration.
pub fn walk_slot_prices(
    policy: &PricingPolicy,
    start_minutes: i32,
    lead_minutes: i32,
    day_end_minutes: i32,
    busy: &[Interval],
) -> Vec<SlotPrice> {
    let day_end = day_end_minutes.min(MINUTES_PER_DAY);
    let hundred = dec!(100);

    let mut prices = Vec::new();
    let mut total = Decimal::ZERO;
    let mut slot_count: i32 = 0;
    let mut t = start_minutes + lead_minutes;

    while t + PRICING_SLOT_MINUTES <= day_end {
        let slot_end = t + PRICING_SLOT_MINUTES;
        if overlaps_any(t, slot_end, busy) {
            break;
        }
        slot_count += 1;

        let slot_price = if policy.is_fixed_hourly {
            policy.price_per_slot
        } else {
            let discount = discount_for_slot(&policy.per_slot_discounts, slot_count);
            policy.price_per_slot * (Decimal::ONE - discount / hundred)
        };
        total += slot_price;

        prices.push(SlotPrice {
            end_time: minutes_to_time(slot_end),
            end_minutes: slot_end,
            total_price: round_money(total, 2),
        });
        t = slot_end;
    }

    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn package(price: Decimal, is_fixed: bool) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: "Full Production".to_string(),
            price,
            is_fixed,
            category_id: Uuid::new_v4(),
            min_hours: 0,
        }
    }

    fn discounts(entries: &[(i32, Decimal)]) -> Vec<SlotDiscount> {
        entries
            .iter()
            .map(|&(slot_index, discount_percent)| SlotDiscount {
                slot_index,
                discount_percent,
            })
            .collect()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        // Banker's rounding: 0.5 rounds to nearest even
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== resolve_policy tests ====================

    #[test]
    fn test_policy_defaults_to_package() {
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        assert_eq!(policy.price_per_slot, dec!(1000));
        assert!(policy.is_fixed_hourly);
    }

    #[test]
    fn test_policy_rule_overrides_package() {
        let pkg = package(dec!(1000), true);
        let rule = PriceRule {
            id: Uuid::new_v4(),
            package_id: pkg.id,
            weekday: Some(6),
            price: dec!(1500),
            is_fixed: true,
        };
        let policy = resolve_policy(&pkg, vec![], Some(&rule), None);
        assert_eq!(policy.price_per_slot, dec!(1500));
    }

    #[test]
    fn test_policy_exception_overrides_rule() {
        let pkg = package(dec!(1000), true);
        let rule = PriceRule {
            id: Uuid::new_v4(),
            package_id: pkg.id,
            weekday: Some(6),
            price: dec!(1500),
            is_fixed: true,
        };
        let exception = PriceException {
            id: Uuid::new_v4(),
            package_id: pkg.id,
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            price: dec!(2500),
            is_fixed: false,
        };
        let policy = resolve_policy(&pkg, vec![], Some(&rule), Some(&exception));
        assert_eq!(policy.price_per_slot, dec!(2500));
        assert!(!policy.is_fixed_hourly);
    }

    // ==================== walk_slot_prices tests ====================

    #[test]
    fn test_walk_fixed_hourly() {
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        let prices = walk_slot_prices(&policy, 600, 0, 720, &[]);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].end_time, "11:00");
        assert_eq!(prices[0].total_price, dec!(1000));
        assert_eq!(prices[1].end_time, "12:00");
        assert_eq!(prices[1].total_price, dec!(2000));
    }

    #[test]
    fn test_walk_per_slot_discounts() {
        // Slot 1 undiscounted, slot 2 at 10% off: cumulative 1000, 1900
        let pkg = package(dec!(1000), false);
        let schedule = discounts(&[(1, dec!(0)), (2, dec!(10))]);
        let policy = resolve_policy(&pkg, schedule, None, None);
        let prices = walk_slot_prices(&policy, 600, 0, 720, &[]);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].total_price, dec!(1000));
        assert_eq!(prices[1].total_price, dec!(1900));
    }

    #[test]
    fn test_walk_missing_discount_entry_means_full_price() {
        let pkg = package(dec!(1000), false);
        let schedule = discounts(&[(2, dec!(50))]);
        let policy = resolve_policy(&pkg, schedule, None, None);
        let prices = walk_slot_prices(&policy, 600, 0, 780, &[]);

        assert_eq!(prices[0].total_price, dec!(1000)); // slot 1: no entry
        assert_eq!(prices[1].total_price, dec!(1500)); // slot 2: half price
        assert_eq!(prices[2].total_price, dec!(2500)); // slot 3: no entry
    }

    #[test]
    fn test_walk_stops_at_busy_interval() {
        // Booking at 12:00-13:00: walk from 10:00 prices two hours then stops,
        // without emitting the conflicting step
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        let busy = [Interval::new(720, 780)];
        let prices = walk_slot_prices(&policy, 600, 0, 1080, &busy);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices.last().unwrap().end_time, "12:00");
    }

    #[test]
    fn test_walk_category_lead_shifts_start() {
        // A 2-hour minimum lead means pricing begins at the 2-hour mark
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        let prices = walk_slot_prices(&policy, 600, 120, 900, &[]);

        assert_eq!(prices.first().unwrap().end_time, "13:00");
        assert_eq!(prices.len(), 3);
    }

    #[test]
    fn test_walk_never_crosses_midnight() {
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        let prices = walk_slot_prices(&policy, 1380, 0, 2000, &[]);

        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].end_minutes, 1440);
        assert_eq!(prices[0].end_time, "24:00");
    }

    #[test]
    fn test_walk_rounds_cumulative_totals() {
        let pkg = package(dec!(999.99), false);
        let schedule = discounts(&[(1, dec!(33.3))]);
        let policy = resolve_policy(&pkg, schedule, None, None);
        let prices = walk_slot_prices(&policy, 600, 0, 660, &[]);

        // 999.99 * 0.667 = 666.99333, rounded half-even to cents
        assert_eq!(prices[0].total_price, dec!(666.99));
    }

    #[test]
    fn test_walk_start_already_busy_is_empty() {
        let pkg = package(dec!(1000), true);
        let policy = resolve_policy(&pkg, vec![], None, None);
        let busy = [Interval::new(600, 720)];
        assert!(walk_slot_prices(&policy, 630, 0, 1080, &busy).is_empty());
    }
}
