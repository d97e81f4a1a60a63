//! Calendar and time-scale helpers shared by the miqat crates.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - Bridging between chrono dates/instants and "hours after 0h UT"
//! - Small calendar predicates (leap years, day of year)
//!
//! Everything here is UT based. The prayer engine works in local solar
//! time expressed as an offset from 0h UT of a calendar date, so no time
//! zone database is needed.

pub mod julian;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, date_to_jd, jd_to_calendar, jd_to_date,
};

/// Milliseconds in one hour.
const MS_PER_HOUR: f64 = 3_600_000.0;

/// The UTC instant `hours` after 0h UT on `date`.
///
/// `hours` may be negative or exceed 24; the result then falls on the
/// previous or following UTC day. Non-finite input maps to 0h UT so that
/// callers never observe a panic from chrono arithmetic.
pub fn utc_instant(date: NaiveDate, hours: f64) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    if !hours.is_finite() {
        return midnight;
    }
    let ms = (hours * MS_PER_HOUR).round() as i64;
    midnight + Duration::milliseconds(ms)
}

/// Hours elapsed from 0h UT on `date` to `instant` (may be negative).
pub fn hours_since_midnight(date: NaiveDate, instant: DateTime<Utc>) -> f64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (instant - midnight).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal day of the year (Jan 1 = 1).
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn instant_same_day() {
        let t = utc_instant(d(2024, 3, 20), 9.5);
        assert_eq!(t.date_naive(), d(2024, 3, 20));
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn instant_negative_hours_previous_day() {
        let t = utc_instant(d(2024, 3, 20), -0.5);
        assert_eq!(t.date_naive(), d(2024, 3, 19));
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn instant_past_24_next_day() {
        let t = utc_instant(d(2024, 12, 31), 25.0);
        assert_eq!(t.date_naive(), d(2025, 1, 1));
        assert_eq!(t.hour(), 1);
    }

    #[test]
    fn instant_nan_is_midnight() {
        let t = utc_instant(d(2024, 3, 20), f64::NAN);
        assert_eq!(t, d(2024, 3, 20).and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn hours_roundtrip() {
        let date = d(2024, 6, 21);
        let t = utc_instant(date, 17.25);
        assert!((hours_since_midnight(date, t) - 17.25).abs() < 1e-9);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2025), 365);
    }

    #[test]
    fn ordinal_day() {
        assert_eq!(day_of_year(d(2024, 1, 1)), 1);
        assert_eq!(day_of_year(d(2024, 3, 20)), 80);
        assert_eq!(day_of_year(d(2023, 12, 31)), 365);
    }
}
