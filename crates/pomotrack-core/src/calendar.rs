//! Local calendar boundaries (day, Monday-based week).

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Longest DST gap searched when local midnight does not exist.
const MAX_GAP_HOURS: i64 = 3;

/// Midnight at the start of `date` in `tz`.
///
/// Where a DST transition skips midnight, the day starts at the first whole
/// wall-clock hour that exists.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..MAX_GAP_HOURS)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + Duration::hours(hour)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// `[start, end)` of the local calendar day `date`, as UTC instants.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    (
        start_of_day(date, tz).with_timezone(&Utc),
        start_of_day(next, tz).with_timezone(&Utc),
    )
}

/// `[Monday 00:00, next Monday 00:00)` of the week containing `now`, in
/// `now`'s timezone.
pub fn week_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    let tz = now.timezone();
    let today = now.date_naive();
    let days_from_monday = u64::from(today.weekday().num_days_from_monday());
    let monday = today
        .checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(today);
    let next_monday = monday.checked_add_days(Days::new(7)).unwrap_or(monday);

    (start_of_day(monday, &tz), start_of_day(next_monday, &tz))
}
