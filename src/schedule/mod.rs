//! Time, interval and availability primitives for the booking core.
//!
//! Everything in this module is pure computation over minute-of-day offsets;
//! the database-facing callers live in the `booking` module.

pub mod availability;
pub mod intervals;
pub mod time;

pub use availability::{available_start_slots, next_half_hour, AvailableSlot, SLOT_STEP_MINUTES};
pub use intervals::{has_free_interval, merge_intervals, overlaps_any, Interval};
pub use time::{day_bounds, minutes_to_time, time_to_minutes, MINUTES_PER_DAY};
