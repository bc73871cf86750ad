use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::calendar;
use crate::pomodoro::Pomodoro;

/// Whole hours per weekday (Monday = 0) for the current local week.
pub fn weekly_hours(pomodoros: &[Pomodoro]) -> [u64; 7] {
    weekly_hours_at(pomodoros, &Local::now())
}

/// Whole hours per weekday (Monday = 0) for the week containing `now`.
///
/// A pomodoro belongs to the weekday of its `start_at` in `now`'s timezone
/// and is ignored unless it starts inside `[Monday 00:00, next Monday 00:00)`.
/// Each pomodoro contributes whole minutes; each bucket is then truncated to
/// whole hours.
pub fn weekly_hours_at<Tz: TimeZone>(pomodoros: &[Pomodoro], now: &DateTime<Tz>) -> [u64; 7] {
    let mut minutes = [0u64; 7];
    if pomodoros.is_empty() {
        return minutes;
    }

    let tz = now.timezone();
    let (week_start, week_end) = calendar::week_bounds(now);

    for pomodoro in pomodoros {
        let start = pomodoro.start_at.with_timezone(&tz);
        if start >= week_start && start < week_end {
            let day = start.weekday().num_days_from_monday() as usize;
            minutes[day] += pomodoro.seconds_duration / 60;
        }
    }

    minutes.map(|m| m / 60)
}
