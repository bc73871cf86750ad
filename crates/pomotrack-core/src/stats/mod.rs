//! Statistics over pomodoro records.
//!
//! Pure functions: they take records already loaded from a store and never
//! touch storage themselves.

mod totals;
mod weekly;

pub use totals::{count_active_days, count_active_days_in, total_hours};
pub use weekly::{weekly_hours, weekly_hours_at};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::pomodoro::Pomodoro;

/// All aggregates for one record listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub pomodoros: usize,
    pub total_hours: f64,
    pub active_days: usize,
    /// Monday first.
    pub weekly_hours: [u64; 7],
}

/// Aggregate `pomodoros` (sorted by `start_at`) with calendar boundaries
/// taken in `now`'s timezone.
pub fn summarize<Tz: TimeZone>(pomodoros: &[Pomodoro], now: &DateTime<Tz>) -> Summary {
    Summary {
        pomodoros: pomodoros.len(),
        total_hours: total_hours(pomodoros),
        active_days: count_active_days_in(pomodoros, &now.timezone()),
        weekly_hours: weekly_hours_at(pomodoros, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn summary_of_nothing_is_default() {
        assert_eq!(summarize(&[], &Utc::now()), Summary::default());
    }

    #[test]
    fn summary_combines_all_aggregates() {
        let wednesday = Utc.with_ymd_and_hms(2024, 5, 15, 14, 0, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2024, 5, 13, 9, 0, 0).unwrap();
        let pomodoros = [
            Pomodoro::new(monday, monday, 3600),
            Pomodoro::new(wednesday, wednesday, 1800),
        ];

        let summary = summarize(&pomodoros, &wednesday);
        assert_eq!(summary.pomodoros, 2);
        assert_eq!(summary.total_hours, 1.5);
        assert_eq!(summary.active_days, 2);
        assert_eq!(summary.weekly_hours, [1, 0, 0, 0, 0, 0, 0]);
    }
}
