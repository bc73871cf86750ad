use chrono::{Local, TimeZone};

use crate::pomodoro::Pomodoro;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Sum of all accumulated durations, in fractional hours.
pub fn total_hours(pomodoros: &[Pomodoro]) -> f64 {
    let seconds: u64 = pomodoros.iter().map(|p| p.seconds_duration).sum();
    seconds as f64 / SECONDS_PER_HOUR
}

/// Number of local calendar days with at least one pomodoro.
///
/// See [`count_active_days_in`].
pub fn count_active_days(pomodoros: &[Pomodoro]) -> usize {
    count_active_days_in(pomodoros, &Local)
}

/// Counts day changes between consecutive `start_at` values in `tz`.
///
/// Input must be sorted ascending by `start_at` (store listings already
/// are). Unsorted input that revisits an earlier day counts that day again.
///
/// Days are compared as full calendar dates, not by day-of-month alone: two
/// consecutive pomodoros on May 13 and June 13 count as two days. This is
/// still a change counter, not a count of distinct dates.
pub fn count_active_days_in<Tz: TimeZone>(pomodoros: &[Pomodoro], tz: &Tz) -> usize {
    let Some(first) = pomodoros.first() else {
        return 0;
    };

    let mut previous = first.start_at.with_timezone(tz).date_naive();
    let mut count = 1;
    for pomodoro in &pomodoros[1..] {
        let day = pomodoro.start_at.with_timezone(tz).date_naive();
        if day != previous {
            count += 1;
        }
        previous = day;
    }
    count
}
