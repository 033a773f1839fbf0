use chrono::{Datelike, Duration, NaiveDate};

/// Shift a date by a whole number of days (negative moves backwards).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Signed whole-day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// True when `date` falls inside `[start, start + horizon_days]`, both
/// boundaries inclusive.
pub fn within_window(date: NaiveDate, start: NaiveDate, horizon_days: i64) -> bool {
    date >= start && date <= start + Duration::days(horizon_days)
}

/// Calendar-month activity flags (January = index 0) for the span between
/// `start` and `end`, inclusive of both terminal months. Spans that cross a
/// year boundary wrap around the matrix; spans of a year or more fill it.
pub fn month_activity(start: NaiveDate, end: NaiveDate) -> [bool; 12] {
    let mut active = [false; 12];

    if end < start {
        active[start.month0() as usize] = true;
        return active;
    }

    let year_gap = end.year() - start.year();
    if year_gap > 1 || (year_gap == 1 && end.month0() >= start.month0()) {
        return [true; 12];
    }

    if year_gap == 0 {
        for index in start.month0()..=end.month0() {
            active[index as usize] = true;
        }
    } else {
        for index in start.month0()..12 {
            active[index as usize] = true;
        }
        for index in 0..=end.month0() {
            active[index as usize] = true;
        }
    }

    active
}
