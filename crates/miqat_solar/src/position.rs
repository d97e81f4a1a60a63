//! Apparent solar coordinates and the equation of time.
//!
//! Low-precision series from the USNO "Approximate Solar Coordinates"
//! note (valid 1950–2050 to ~1 arcminute, usable well beyond):
//!
//! ```text
//! D = JD − 2451545.0
//! g = 357.529 + 0.98560028 D          mean anomaly
//! q = 280.459 + 0.98564736 D          mean longitude
//! L = q + 1.915 sin g + 0.020 sin 2g  apparent ecliptic longitude
//! e = 23.439 − 0.00000036 D           obliquity
//! RA = atan2(cos e sin L, cos L)
//! δ  = asin(sin e sin L)
//! EoT = q/15 − RA                     (hours)
//! ```

use chrono::NaiveDate;
use miqat_time::{J2000_JD, date_to_jd};

use crate::angle::{normalize_degrees, normalize_hours};
use crate::coordinate::Coordinate;

/// Sun position quantities needed to place prayer times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent declination in degrees, within ±23.45.
    pub declination_deg: f64,
    /// Equation of time (apparent − mean solar time) in minutes,
    /// within roughly ±17.
    pub equation_of_time_min: f64,
    /// Apparent right ascension in hours, [0, 24).
    pub right_ascension_h: f64,
}

/// Solar position at a Julian Date (UT).
pub fn solar_position_at_jd(jd: f64) -> SolarPosition {
    let d = jd - J2000_JD;

    let g = normalize_degrees(357.529 + 0.985_600_28 * d).to_radians();
    let q = normalize_degrees(280.459 + 0.985_647_36 * d);
    let l = normalize_degrees(q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();
    let e = (23.439 - 0.000_000_36 * d).to_radians();

    let ra_h = normalize_hours((e.cos() * l.sin()).atan2(l.cos()).to_degrees() / 15.0);
    let declination_deg = (e.sin() * l.sin()).asin().to_degrees();

    // q/15 and RA both live in [0, 24); fold the difference back to ±12 h.
    let eqt_h = normalize_hours(q / 15.0 - ra_h + 12.0) - 12.0;

    SolarPosition {
        declination_deg,
        equation_of_time_min: eqt_h * 60.0,
        right_ascension_h: ra_h,
    }
}

/// Solar position at the observer's approximate local solar noon on `date`.
///
/// The time of day carried by a caller's timestamp plays no part: the
/// calendar day alone selects the evaluation instant.
pub fn solar_position(date: NaiveDate, coordinate: &Coordinate) -> SolarPosition {
    let noon_ut_h = 12.0 - coordinate.longitude_deg() / 15.0;
    solar_position_at_jd(date_to_jd(date) + noon_ut_h / 24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn greenwich() -> Coordinate {
        Coordinate::new(51.4769, 0.0).unwrap()
    }

    #[test]
    fn equinox_declination_near_zero() {
        let p = solar_position(d(2024, 3, 20), &greenwich());
        assert!(p.declination_deg.abs() < 0.5, "dec = {}", p.declination_deg);
    }

    #[test]
    fn june_solstice_declination() {
        let p = solar_position(d(2024, 6, 20), &greenwich());
        assert!(
            (p.declination_deg - 23.44).abs() < 0.05,
            "dec = {}",
            p.declination_deg
        );
    }

    #[test]
    fn december_solstice_declination() {
        let p = solar_position(d(2024, 12, 21), &greenwich());
        assert!(
            (p.declination_deg + 23.44).abs() < 0.05,
            "dec = {}",
            p.declination_deg
        );
    }

    #[test]
    fn equation_of_time_extremes() {
        // Early November: about +16.4 min. Mid February: about −14.2 min.
        let nov = solar_position(d(2024, 11, 3), &greenwich()).equation_of_time_min;
        let feb = solar_position(d(2024, 2, 11), &greenwich()).equation_of_time_min;
        assert!((nov - 16.4).abs() < 0.5, "EoT Nov = {nov}");
        assert!((feb + 14.2).abs() < 0.5, "EoT Feb = {feb}");
    }

    #[test]
    fn ranges_over_a_year() {
        let mut date = d(2025, 1, 1);
        for _ in 0..365 {
            let p = solar_position(date, &greenwich());
            assert!(p.declination_deg.abs() <= 23.45, "dec {p:?} on {date}");
            assert!(p.equation_of_time_min.abs() <= 17.0, "eot {p:?} on {date}");
            assert!((0.0..24.0).contains(&p.right_ascension_h));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn pure_function() {
        let c = Coordinate::new(21.4225, 39.8262).unwrap();
        assert_eq!(
            solar_position(d(2024, 3, 20), &c),
            solar_position(d(2024, 3, 20), &c)
        );
    }
}
