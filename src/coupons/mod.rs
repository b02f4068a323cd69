//! Coupon validation with write-time usage-cap enforcement.

pub mod models;
pub mod queries;
pub mod services;

pub use models::Coupon;
pub use services::{check_coupon, redeem, Redeemer};
