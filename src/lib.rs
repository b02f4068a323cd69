//! PodStudio booking backend.
//!
//! The core of this crate is the session-scheduling engine: interval-based
//! availability over a shared slot pool, layered slot pricing, and a
//! conflict-safe booking commit. The HTTP layer in `routes` is a thin JSON
//! adapter over it.

pub mod booking;
pub mod cache;
pub mod catalog;
pub mod coupons;
pub mod error;
pub mod notifications;
pub mod pricing;
pub mod routes;
pub mod schedule;

use sqlx::PgPool;

pub use cache::AppCache;
pub use error::{AppError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
