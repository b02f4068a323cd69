//! Busy-interval arithmetic.
//!
//! Merges the `[start, end)` minute intervals consumed by existing bookings
//! and answers overlap and free-gap queries against the merged set. Expected
//! cardinality is bookings-per-day, so a sorted vector with an early-exit
//! scan beats any tree structure here.

/// A half-open `[start, end)` range of minutes within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i32,
    pub end: i32,
}

impl Interval {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Intervals with `end <= start` carry no time and are dropped by merge.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }
}

/// Merge intervals into a sorted, pairwise non-overlapping list.
///
/// Invalid (inverted or empty) intervals are filtered out. Touching
/// intervals coalesce: `[0,60)` and `[60,120)` merge into `[0,120)`.
/// Merging an already-merged list returns it unchanged.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(Interval::is_valid);
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

/// Whether `[start, end)` overlaps any interval in a merged, sorted list.
///
/// Exits as soon as a merged interval starts at or after the query's end:
/// the list is sorted, so no later interval can overlap either.
pub fn overlaps_any(start: i32, end: i32, merged: &[Interval]) -> bool {
    for iv in merged {
        if iv.start >= end {
            return false;
        }
        if iv.end > start {
            return true;
        }
    }
    false
}

/// Whether the window `[day_start, day_end)` still contains a free gap of at
/// least `required_minutes` outside the given busy intervals.
///
/// Checks the gap before the first merged interval, between consecutive
/// intervals, and after the last. Used for day-level fully-booked probes
/// independent of any specific start time.
pub fn has_free_interval(
    intervals: Vec<Interval>,
    day_start: i32,
    day_end: i32,
    required_minutes: i32,
) -> bool {
    if required_minutes <= 0 || day_end <= day_start {
        return false;
    }

    let merged = merge_intervals(intervals);

    let mut cursor = day_start;
    for iv in &merged {
        let busy_start = iv.start.max(day_start);
        let busy_end = iv.end.min(day_end);
        if busy_end <= busy_start {
            continue;
        }
        if busy_start - cursor >= required_minutes {
            return true;
        }
        cursor = cursor.max(busy_end);
    }

    day_end - cursor >= required_minutes
}
