//! Boundary-aligned refresh scheduling
//!
//! The visible string must change exactly as the wall clock crosses a
//! second/minute/hour boundary, no matter how long the previous redraw took.
//! Each tick computes the sleep needed to wake just before the next boundary
//! aligned to the configured interval: 50ms early when the boundary is less
//! than a second away, otherwise 950ms into the second before it (the early
//! wake observes the boundary has not passed and reschedules precisely on
//! the following tick).

use chrono::{DateTime, Local, Timelike};
use std::time::Duration;

use crate::constants::{MICROS_PER_SEC, WAKE_EARLY_MICROS, WAKE_LATE_IN_SECOND_MICROS};

/// How long the event loop should wait before the next mandatory redraw.
///
/// Always finite and non-negative. The caller's wait primitive may be
/// interrupted early by display events or shutdown; either outcome means
/// "reconsider now", never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDecision {
    pub sleep: Duration,
}

impl ScheduleDecision {
    /// Split into whole seconds and microseconds for timeval-style waits.
    pub fn as_timeval(&self) -> (u64, u32) {
        (self.sleep.as_secs(), self.sleep.subsec_micros())
    }
}

/// Compute the sleep until the next boundary-aligned wake.
///
/// Regimes by `interval_secs`:
/// - `1`: the next wall-clock second, waking 50ms early; within the last
///   50ms of the current second, target 50ms *after* the next boundary
///   instead, avoiding a double wake at the edge.
/// - `2..=59`: the next multiple of the interval in epoch seconds.
/// - `60..=3599`: the next minute boundary that is a multiple of the
///   interval rounded to whole minutes, seconds cleared.
/// - `>= 3600`: the top of the next hour.
///
/// A failed civil-calendar computation degrades to a flat
/// `now + interval` decision rather than blocking indefinitely.
pub fn next_wake(now: DateTime<Local>, interval_secs: u32) -> ScheduleDecision {
    if interval_secs == 0 {
        tracing::warn!("refresh interval of 0s clamped to 1s");
    }
    let interval = i64::from(interval_secs.max(1));

    if interval == 1 {
        return next_second_wake(now);
    }

    let now_secs = now.timestamp();
    let micros_into_sec = i64::from(now.timestamp_subsec_micros()).min(MICROS_PER_SEC - 1);

    let boundary_secs = if interval >= 3600 {
        next_hour_boundary(now)
    } else if interval >= 60 {
        next_minute_boundary(now, interval)
    } else {
        Some((now_secs.div_euclid(interval) + 1) * interval)
    };

    let Some(boundary_secs) = boundary_secs else {
        tracing::warn!(interval, "calendar boundary computation failed, using flat interval");
        return ScheduleDecision { sleep: Duration::from_secs(interval as u64) };
    };

    let wait_secs = (boundary_secs - now_secs).max(1);
    let sleep_micros = if wait_secs > 1 {
        (wait_secs - 1) * MICROS_PER_SEC + WAKE_LATE_IN_SECOND_MICROS - micros_into_sec
    } else {
        wait_secs * MICROS_PER_SEC - WAKE_EARLY_MICROS - micros_into_sec
    };

    ScheduleDecision { sleep: micros_to_duration(sleep_micros) }
}

fn next_second_wake(now: DateTime<Local>) -> ScheduleDecision {
    let micros = i64::from(now.timestamp_subsec_micros()).min(MICROS_PER_SEC - 1);
    let sleep_micros = if micros < WAKE_LATE_IN_SECOND_MICROS {
        WAKE_LATE_IN_SECOND_MICROS - micros
    } else {
        MICROS_PER_SEC + WAKE_EARLY_MICROS - micros
    };
    ScheduleDecision { sleep: micros_to_duration(sleep_micros) }
}

fn next_hour_boundary(now: DateTime<Local>) -> Option<i64> {
    let top = now.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
    top.checked_add_signed(chrono::Duration::hours(1))
        .map(|t| t.timestamp())
}

fn next_minute_boundary(now: DateTime<Local>, interval: i64) -> Option<i64> {
    let step = ((interval + 30) / 60).max(1); // round to whole minutes
    let next_min = (i64::from(now.minute()) / step + 1) * step;
    let top = now.with_minute(0)?.with_second(0)?.with_nanosecond(0)?;
    // Addition past minute 59 rolls into the next hour, like mktime
    // normalization would.
    top.checked_add_signed(chrono::Duration::minutes(next_min))
        .map(|t| t.timestamp())
}

fn micros_to_duration(micros: i64) -> Duration {
    Duration::from_micros(micros.max(0) as u64)
}
