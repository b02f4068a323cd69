//! Wall-clock time codec.
//!
//! Converts "HH:MM" strings to minute-of-day offsets and back, and computes
//! UTC day boundaries for date-range queries. All slot arithmetic in the
//! booking core is done on integer minutes since midnight.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{AppError, Result};

/// Minutes in a full day. End slots may equal this (a session ending exactly
/// at midnight) but never exceed it.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Parse a "HH:MM" time-of-day string into minutes since midnight.
///
/// Accepts both zero-padded ("09:05") and unpadded ("9:5") components.
///
/// # Examples
/// ```
/// use podstudio_web::schedule::time_to_minutes;
///
/// assert_eq!(time_to_minutes("09:30").unwrap(), 570);
/// assert_eq!(time_to_minutes("9:30").unwrap(), 570);
/// assert!(time_to_minutes("junk").is_err());
/// ```
pub fn time_to_minutes(time: &str) -> Result<i32> {
    let (hours, minutes) = time
        .split_once(':')
        .ok_or_else(|| AppError::InvalidInput(format!("invalid time format: {}", time)))?;

    let hours: i32 = hours
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid hour in: {}", time)))?;
    let minutes: i32 = minutes
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid minute in: {}", time)))?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(AppError::InvalidInput(format!("time out of range: {}", time)));
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as a zero-padded "HH:MM" string.
///
/// Does not wrap at midnight: callers must keep offsets within a single day.
/// The one historical caller that wrapped with a modulo has been replaced by
/// an explicit end-slot bound check at booking time.
pub fn minutes_to_time(minutes: i32) -> String {
    debug_assert!((0..=MINUTES_PER_DAY).contains(&minutes));
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// UTC day boundaries for a calendar date, as a half-open range.
///
/// The upper bound is the *next* day's midnight (exclusive), suitable for
/// `>= $start AND < $end` queries without millisecond truncation.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).expect("midnight always exists").and_utc();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== time_to_minutes tests ====================

    #[test]
    fn test_parse_padded() {
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("09:30").unwrap(), 570);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_unpadded() {
        assert_eq!(time_to_minutes("9:30").unwrap(), 570);
        assert_eq!(time_to_minutes("9:5").unwrap(), 545);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(time_to_minutes("ab:cd").is_err());
        assert!(time_to_minutes("10:xx").is_err());
        assert!(time_to_minutes("noon").is_err());
        assert!(time_to_minutes("").is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(time_to_minutes("24:00").is_err());
        assert!(time_to_minutes("10:60").is_err());
        assert!(time_to_minutes("-1:30").is_err());
    }

    // ==================== minutes_to_time tests ====================

    #[test]
    fn test_format_round_trip() {
        for minutes in [0, 1, 59, 60, 570, 1439] {
            assert_eq!(time_to_minutes(&minutes_to_time(minutes)).unwrap(), minutes);
        }
    }

    #[test]
    fn test_format_zero_pads() {
        assert_eq!(minutes_to_time(545), "09:05");
        assert_eq!(minutes_to_time(0), "00:00");
    }

    // ==================== day_bounds tests ====================

    #[test]
    fn test_day_bounds_exclusive_upper() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let (start, end) = day_bounds(date);

        assert_eq!(start.to_rfc3339(), "2025-06-16T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-06-17T00:00:00+00:00");
        // A booking stamped at the last millisecond of the day is inside the range
        let late = date.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc();
        assert!(late >= start && late < end);
    }
}
