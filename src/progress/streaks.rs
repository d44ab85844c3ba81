//! Calendar helpers for daily streaks and day-boundary resets.
//!
//! All dates are local wall-clock dates, not UTC-normalized.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local date and time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Local hour (0-23) of a timestamp
pub fn hour_of(at: NaiveDateTime) -> u32 {
    at.hour()
}

/// Compute the streak after activity on `today`.
///
/// Returns `None` when the streak is unchanged (already counted today, or the
/// clock moved backwards). Activity the day after the last active day extends
/// the streak; any larger gap, or no prior activity, restarts it at 1.
pub fn next_streak(current: u32, last_active: Option<NaiveDate>, today: NaiveDate) -> Option<u32> {
    let Some(last_day) = last_active else {
        return Some(1);
    };

    match (today - last_day).num_days() {
        days if days <= 0 => None,
        1 => Some(current.max(1).saturating_add(1)),
        _ => Some(1),
    }
}
