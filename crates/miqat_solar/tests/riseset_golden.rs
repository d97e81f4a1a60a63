//! Golden values for sunrise/sunset against published almanac tables
//! (USNO / timeanddate.com), 2-minute tolerance.

use chrono::NaiveDate;
use miqat_solar::{Coordinate, HorizonConfig, SolarDay};

/// Two minutes in hours.
const TOLERANCE_H: f64 = 2.0 / 60.0;

fn solve(lat: f64, lon: f64, y: i32, m: u32, d: u32) -> SolarDay {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    SolarDay::new(date, Coordinate::new(lat, lon).unwrap(), &HorizonConfig::default())
}

fn hm(h: u32, m: u32) -> f64 {
    h as f64 + m as f64 / 60.0
}

#[test]
fn london_june_solstice() {
    let day = solve(51.5074, -0.1278, 2024, 6, 21);
    // 04:43 / 21:21 BST
    let rise = day.sunrise_hours().unwrap();
    let set = day.sunset_hours().unwrap();
    assert!((rise - hm(3, 43)).abs() < TOLERANCE_H, "London sunrise = {rise:.3}h UT");
    assert!((set - hm(20, 21)).abs() < TOLERANCE_H, "London sunset = {set:.3}h UT");
}

#[test]
fn new_york_december_solstice() {
    let day = solve(40.7128, -74.0060, 2024, 12, 21);
    // 07:16 / 16:32 EST
    let rise = day.sunrise_hours().unwrap();
    let set = day.sunset_hours().unwrap();
    assert!((rise - hm(12, 16)).abs() < TOLERANCE_H, "NYC sunrise = {rise:.3}h UT");
    assert!((set - hm(21, 32)).abs() < TOLERANCE_H, "NYC sunset = {set:.3}h UT");
}

#[test]
fn sydney_september_equinox_crosses_utc_midnight() {
    let day = solve(-33.8688, 151.2093, 2024, 9, 22);
    // 05:45 / 17:52 AEST (UTC+10): sunrise is on the previous UT day.
    let rise = day.sunrise_hours().unwrap();
    let set = day.sunset_hours().unwrap();
    assert!(rise < 0.0, "sunrise should precede 0h UT, got {rise}");
    assert!((rise - (hm(5, 45) - 10.0)).abs() < TOLERANCE_H, "Sydney sunrise = {rise:.3}h UT");
    assert!((set - (hm(17, 52) - 10.0)).abs() < TOLERANCE_H, "Sydney sunset = {set:.3}h UT");
}

#[test]
fn tromso_winter_never_rises() {
    let day = solve(69.6492, 18.9553, 2024, 12, 21);
    assert!(day.sunrise_hours().is_none());
    assert!(day.sunset_hours().is_none());
}
