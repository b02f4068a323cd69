//! Pricing engine for studio sessions.
//!
//! Resolves the layered pricing policy (package default, weekday rule, date
//! exception) and walks hour-by-hour from a start time to produce cumulative
//! prices for every reachable end time.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod services;

// Re-export commonly used items
pub use calculators::{resolve_policy, round_money, walk_slot_prices, SlotPrice, PRICING_SLOT_MINUTES};
pub use models::{PriceException, PriceRule, PricingPolicy, SlotDiscount};
pub use services::{quote_slot_prices, resolve_pricing_policy};
