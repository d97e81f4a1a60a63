//! Moonsighting Committee seasonal twilight bounds.
//!
//! Khalid Shaukat's piecewise-linear rule gives, for a latitude and the
//! number of days since the winter solstice (of that hemisphere), the
//! minutes between Fajr and sunrise and between sunset and Isha. The
//! year is split at days 91, 137, 183, 229 and 275 with anchor values
//! `a, b, c, d` growing linearly with |latitude| / 55.

use chrono::{Datelike, NaiveDate};
use miqat_time::{day_of_year, days_in_year, is_leap_year};

use crate::convention::Shafaq;

/// Days since the local winter solstice.
///
/// Northern hemisphere: day of year + 10 (Dec 21 ≈ day 0).
/// Southern hemisphere: day of year − 172 (173 in leap years).
pub fn days_since_solstice(date: NaiveDate, latitude_deg: f64) -> u32 {
    let year = date.year();
    let doy = day_of_year(date) as i64;
    let year_len = days_in_year(year) as i64;
    let days = if latitude_deg >= 0.0 {
        let n = doy + 10;
        if n >= year_len { n - year_len } else { n }
    } else {
        let southern_offset = if is_leap_year(year) { 173 } else { 172 };
        let n = doy - southern_offset;
        if n < 0 { n + year_len } else { n }
    };
    days as u32
}

/// Minutes from Fajr to sunrise.
pub fn morning_twilight_minutes(date: NaiveDate, latitude_deg: f64) -> f64 {
    let lat = latitude_deg.abs();
    let a = 75.0 + 28.65 / 55.0 * lat;
    let b = 75.0 + 19.44 / 55.0 * lat;
    let c = 75.0 + 32.74 / 55.0 * lat;
    let d = 75.0 + 48.10 / 55.0 * lat;
    piecewise(a, b, c, d, days_since_solstice(date, latitude_deg))
}

/// Minutes from sunset to Isha.
pub fn evening_twilight_minutes(date: NaiveDate, latitude_deg: f64, shafaq: Shafaq) -> f64 {
    let lat = latitude_deg.abs();
    let (a, b, c, d) = match shafaq {
        Shafaq::General => (
            75.0 + 25.60 / 55.0 * lat,
            75.0 + 2.05 / 55.0 * lat,
            75.0 - 9.21 / 55.0 * lat,
            75.0 + 6.14 / 55.0 * lat,
        ),
        Shafaq::Ahmer => (
            62.0 + 17.40 / 55.0 * lat,
            62.0 - 7.16 / 55.0 * lat,
            62.0 + 5.12 / 55.0 * lat,
            62.0 + 19.44 / 55.0 * lat,
        ),
        Shafaq::Abyad => (
            75.0 + 25.60 / 55.0 * lat,
            75.0 + 7.16 / 55.0 * lat,
            75.0 + 36.84 / 55.0 * lat,
            75.0 + 81.84 / 55.0 * lat,
        ),
    };
    piecewise(a, b, c, d, days_since_solstice(date, latitude_deg))
}

fn piecewise(a: f64, b: f64, c: f64, d: f64, days: u32) -> f64 {
    let dyy = days as f64;
    match days {
        0..91 => a + (b - a) / 91.0 * dyy,
        91..137 => b + (c - b) / 46.0 * (dyy - 91.0),
        137..183 => c + (d - c) / 46.0 * (dyy - 137.0),
        183..229 => d + (c - d) / 46.0 * (dyy - 183.0),
        229..275 => c + (b - c) / 46.0 * (dyy - 229.0),
        _ => b + (a - b) / 91.0 * (dyy - 275.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn northern_solstice_offset() {
        // Dec 22 (day 356 of 2023) + 10 = 366 → wraps to 1.
        assert_eq!(days_since_solstice(d(2023, 12, 22), 40.0), 1);
        assert_eq!(days_since_solstice(d(2023, 12, 21), 40.0), 0);
        assert_eq!(days_since_solstice(d(2024, 3, 20), 21.4), 90);
    }

    #[test]
    fn southern_solstice_offset() {
        // Leap year: June 21 is day 173 → 0.
        assert_eq!(days_since_solstice(d(2024, 6, 21), -33.0), 0);
        assert_eq!(days_since_solstice(d(2023, 6, 21), -33.0), 0);
        assert_eq!(days_since_solstice(d(2024, 1, 1), -33.0), 1 + 366 - 173);
    }

    #[test]
    fn mecca_equinox_minutes() {
        // Anchors at 21.4225°: a = 86.16, b = 82.57 → 82.61 at day 90.
        let m = morning_twilight_minutes(d(2024, 3, 20), 21.4225);
        assert!((m - 82.61).abs() < 0.05, "morning = {m}");
        let e = evening_twilight_minutes(d(2024, 3, 20), 21.4225, Shafaq::General);
        assert!((e - 75.90).abs() < 0.05, "evening = {e}");
    }

    #[test]
    fn equator_is_flat() {
        for &(m, day) in &[(1, 1), (4, 15), (7, 1), (10, 10)] {
            let v = morning_twilight_minutes(d(2024, m, day), 0.0);
            assert!((v - 75.0).abs() < 1e-9);
        }
    }

    #[test]
    fn piecewise_continuous_at_knots() {
        let (a, b, c, dd) = (80.0, 70.0, 90.0, 100.0);
        for &k in &[91u32, 137, 183, 229, 275] {
            let left = piecewise(a, b, c, dd, k - 1);
            let right = piecewise(a, b, c, dd, k);
            assert!((left - right).abs() < 1.0, "jump at {k}: {left} vs {right}");
        }
    }

    #[test]
    fn shafaq_ordering_in_summer() {
        // Around the northern summer solstice white twilight lasts longest.
        let date = d(2024, 6, 21);
        let ahmer = evening_twilight_minutes(date, 50.0, Shafaq::Ahmer);
        let general = evening_twilight_minutes(date, 50.0, Shafaq::General);
        let abyad = evening_twilight_minutes(date, 50.0, Shafaq::Abyad);
        assert!(ahmer < general && general < abyad);
    }
}
