//! Catalog inputs consumed by the booking core.

pub mod models;
pub mod queries;
pub mod services;

pub use models::{AddOn, Package, Studio};
