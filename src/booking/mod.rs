//! Booking availability and the conflict-safe commit service.

pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use models::{AddOnLine, Booking, BookingStatus};
pub use services::{available_slots, create_booking, day_has_capacity, update_status};
