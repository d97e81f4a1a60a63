//! Julian Date ↔ Gregorian calendar conversions.
//!
//! Source: Meeus, "Astronomical Algorithms", 2nd ed., ch. 7. Valid for
//! any Gregorian date with a positive Julian Day.

use chrono::{Datelike, NaiveDate};

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Gregorian calendar date to Julian Date.
///
/// `day` may carry a fractional part for the time of day
/// (e.g. `20.5` is noon on the 20th).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Julian Date to Gregorian calendar `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date at 0h UT of a calendar date.
pub fn date_to_jd(date: NaiveDate) -> f64 {
    calendar_to_jd(date.year(), date.month(), date.day() as f64)
}

/// Calendar date containing a Julian Date (UT).
pub fn jd_to_date(jd: f64) -> Option<NaiveDate> {
    let (year, month, day) = jd_to_calendar(jd);
    NaiveDate::from_ymd_opt(year, month, day.floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_noon() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 Oct 4.81 → JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6, "jd = {jd}");
    }

    #[test]
    fn january_uses_previous_year_branch() {
        // 1988 Jan 27.0 → JD 2447187.5
        let jd = calendar_to_jd(1988, 1, 27.0);
        assert!((jd - 2_447_187.5).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn calendar_roundtrip() {
        let jd = calendar_to_jd(2024, 3, 20.25);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 3));
        assert!((d - 20.25).abs() < 1e-6, "day = {d}");
    }

    #[test]
    fn date_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert!((date_to_jd(date) - 2_460_389.5).abs() < 1e-9);
        assert_eq!(jd_to_date(2_460_389.5), Some(date));
        assert_eq!(jd_to_date(2_460_389.99), Some(date));
    }
}
