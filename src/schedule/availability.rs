//! Available start-slot generation.
//!
//! Produces the ordered list of bookable start times for a date and duration,
//! stepping at 30-minute granularity through a studio's working window and
//! skipping anything that would overlap the day's merged busy set.
//!
//! The busy set is the *aggregate* across all studios: the business schedules
//! one shared pool of session slots, not per-studio calendars.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::schedule::intervals::{merge_intervals, overlaps_any, Interval};
use crate::schedule::time::minutes_to_time;

/// Granularity of candidate start times.
pub const SLOT_STEP_MINUTES: i32 = 30;

/// A bookable start time, in both display and arithmetic forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSlot {
    pub start_time: String,
    pub start_minutes: i32,
    pub end_time: String,
    pub end_minutes: i32,
}

/// Round a minute offset up to the next 30-minute boundary.
///
/// Same-day requests must not offer retroactive starts, so the first
/// candidate is the boundary at or after "now".
pub fn next_half_hour(now_minutes: i32) -> i32 {
    let rem = now_minutes.rem_euclid(SLOT_STEP_MINUTES);
    if rem == 0 {
        now_minutes
    } else {
        now_minutes + SLOT_STEP_MINUTES - rem
    }
}

/// Generate every valid start slot for the given working window.
///
/// * `min_start` - for today's date, the next half-hour boundary at or after
///   the current wall clock; `None` for future dates.
/// * `busy` - same-day booking intervals across all studios, in any order;
///   they are clamped to the working window and merged here.
///
/// Returns an empty list (not an error) when the duration does not fit the
/// window or no candidate start remains.
pub fn available_start_slots(
    work_start: i32,
    work_end: i32,
    duration_minutes: i32,
    min_start: Option<i32>,
    busy: Vec<Interval>,
) -> Result<Vec<AvailableSlot>> {
    if work_end <= work_start {
        return Err(AppError::InvalidConfiguration(format!(
            "studio working hours are inverted: {} >= {}",
            minutes_to_time(work_start.clamp(0, 1440)),
            minutes_to_time(work_end.clamp(0, 1440)),
        )));
    }
    if duration_minutes <= 0 {
        return Err(AppError::InvalidInput("duration must be positive".to_string()));
    }
    if duration_minutes > work_end - work_start {
        return Ok(Vec::new());
    }

    let merged = merge_intervals(
        busy.into_iter()
            .map(|iv| Interval::new(iv.start.max(work_start), iv.end.min(work_end)))
            .collect(),
    );

    let first = min_start.map_or(work_start, |m| m.max(work_start));
    let last = work_end - duration_minutes;

    let mut slots = Vec::new();
    let mut t = work_start;
    while t <= last {
        if t >= first && !overlaps_any(t, t + duration_minutes, &merged) {
            slots.push(AvailableSlot {
                start_time: minutes_to_time(t),
                start_minutes: t,
                end_time: minutes_to_time(t + duration_minutes),
                end_minutes: t + duration_minutes,
            });
        }
        t += SLOT_STEP_MINUTES;
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::time::time_to_minutes;

    fn iv(start: i32, end: i32) -> Interval {
        Interval::new(start, end)
    }

    fn slots(
        work: (&str, &str),
        duration_hours: i32,
        min_start: Option<i32>,
        busy: Vec<Interval>,
    ) -> Vec<AvailableSlot> {
        available_start_slots(
            time_to_minutes(work.0).unwrap(),
            time_to_minutes(work.1).unwrap(),
            duration_hours * 60,
            min_start,
            busy,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_day_full_grid() {
        let result = slots(("09:00", "18:00"), 2, None, vec![]);
        assert_eq!(result.first().unwrap().start_time, "09:00");
        assert_eq!(result.last().unwrap().start_time, "16:00");
        assert_eq!(result.last().unwrap().end_time, "18:00");
        assert_eq!(result.len(), 15); // 09:00..=16:00 by 30
    }

    #[test]
    fn test_today_starts_at_next_half_hour() {
        // "Now" is 10:13, so the first offered slot is 10:30, not 10:00 or 10:13
        let now = time_to_minutes("10:13").unwrap();
        let result = slots(("09:00", "18:00"), 2, Some(next_half_hour(now)), vec![]);
        assert_eq!(result.first().unwrap().start_time, "10:30");
    }

    #[test]
    fn test_booked_interval_excludes_overlapping_starts() {
        // Existing booking 10:00-12:00, one-hour request:
        // 11:30 would overlap, 12:00 is the first start after the booking
        let result = slots(("09:00", "18:00"), 1, None, vec![iv(600, 720)]);
        let starts: Vec<&str> = result.iter().map(|s| s.start_time.as_str()).collect();
        assert!(!starts.contains(&"11:30"));
        assert!(!starts.contains(&"09:30")); // 09:30+60 crosses into 10:00
        assert!(starts.contains(&"09:00"));
        assert!(starts.contains(&"12:00"));
    }

    #[test]
    fn test_duration_exceeding_window_is_empty() {
        assert!(slots(("09:00", "18:00"), 10, None, vec![]).is_empty());
    }

    #[test]
    fn test_min_start_past_last_candidate_is_empty() {
        let late = time_to_minutes("17:30").unwrap();
        assert!(slots(("09:00", "18:00"), 2, Some(late), vec![]).is_empty());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = available_start_slots(1080, 540, 60, None, vec![]).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_busy_outside_window_is_clamped_away() {
        let result = slots(("09:00", "18:00"), 1, None, vec![iv(0, 540), iv(1080, 1440)]);
        assert_eq!(result.first().unwrap().start_time, "09:00");
        assert_eq!(result.len(), 17);
    }

    #[test]
    fn test_slots_are_ascending() {
        let result = slots(("09:00", "18:00"), 1, None, vec![iv(630, 690), iv(840, 900)]);
        for pair in result.windows(2) {
            assert!(pair[0].start_minutes < pair[1].start_minutes);
        }
    }

    #[test]
    fn test_next_half_hour() {
        assert_eq!(next_half_hour(600), 600);
        assert_eq!(next_half_hour(601), 630);
        assert_eq!(next_half_hour(613), 630);
        assert_eq!(next_half_hour(630), 630);
        assert_eq!(next_half_hour(631), 660);
    }
}
