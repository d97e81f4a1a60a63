//! Transit, rise/set and altitude-crossing times for one calendar date.
//!
//! Times are expressed as hours after 0h UT of the date and may fall
//! outside [0, 24) for observers far from Greenwich. Each solve starts
//! from the meridian transit and re-evaluates the Sun's declination and
//! equation of time at the current estimate until the estimate moves by
//! less than [`CONVERGENCE_HOURS`].

use chrono::NaiveDate;
use miqat_time::date_to_jd;
use tracing::trace;

use crate::coordinate::Coordinate;
use crate::horizon::HorizonConfig;
use crate::position::{SolarPosition, solar_position_at_jd};

/// Maximum refinement iterations per solve.
const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in hours (~0.04 seconds).
const CONVERGENCE_HOURS: f64 = 1.0e-5;

/// Zenith distance ceiling for the Asr shadow rule, just short of 90°.
const MAX_ASR_ZENITH_DEG: f64 = 89.99;

/// Hour angle (degrees, positive) at which the Sun's centre reaches
/// `altitude_deg`.
///
/// `cos H = (sin h − sin φ sin δ) / (cos φ cos δ)`
///
/// Returns `None` when the Sun never reaches that altitude on this day
/// (`|cos H| > 1`) or when the geometry is singular (at a pole).
pub fn hour_angle_deg(altitude_deg: f64, latitude_deg: f64, declination_deg: f64) -> Option<f64> {
    let h = altitude_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    let cos_h = (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !cos_h.is_finite() || !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

/// Solar altitude (degrees) at which an object's shadow equals
/// `shadow_multiplier` times its height plus the noon shadow.
///
/// `h = acot(multiplier + tan|φ − δ|)`
pub fn asr_altitude_deg(shadow_multiplier: f64, latitude_deg: f64, declination_deg: f64) -> f64 {
    let zenith = (latitude_deg - declination_deg).abs().min(MAX_ASR_ZENITH_DEG);
    (1.0 / (shadow_multiplier + zenith.to_radians().tan()))
        .atan()
        .to_degrees()
}

/// Solar event times for one date and observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    date: NaiveDate,
    coordinate: Coordinate,
    jd_midnight: f64,
    transit_h: f64,
    sunrise_h: Option<f64>,
    sunset_h: Option<f64>,
}

impl SolarDay {
    /// Solve transit, sunrise and sunset for `date` at `coordinate`.
    pub fn new(date: NaiveDate, coordinate: Coordinate, horizon: &HorizonConfig) -> Self {
        let jd_midnight = date_to_jd(date);
        let mut day = Self {
            date,
            coordinate,
            jd_midnight,
            transit_h: 12.0 - coordinate.longitude_deg() / 15.0,
            sunrise_h: None,
            sunset_h: None,
        };

        for _ in 0..MAX_ITERATIONS {
            let pos = day.position_at(day.transit_h);
            let next = day.transit_for(&pos);
            let done = (next - day.transit_h).abs() < CONVERGENCE_HOURS;
            day.transit_h = next;
            if done {
                break;
            }
        }

        let altitude = horizon.sunrise_altitude_deg();
        day.sunrise_h = day.time_for_altitude(altitude, false);
        day.sunset_h = day.time_for_altitude(altitude, true);
        if day.sunrise_h.is_none() || day.sunset_h.is_none() {
            trace!(%date, %coordinate, "sun does not cross the horizon");
        }
        day
    }

    /// Calendar date this day was solved for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Observer coordinate this day was solved for.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Meridian transit (solar noon), hours after 0h UT.
    pub fn transit_hours(&self) -> f64 {
        self.transit_h
    }

    /// Sunrise, hours after 0h UT; `None` during polar day or night.
    pub fn sunrise_hours(&self) -> Option<f64> {
        self.sunrise_h
    }

    /// Sunset, hours after 0h UT; `None` during polar day or night.
    pub fn sunset_hours(&self) -> Option<f64> {
        self.sunset_h
    }

    /// Whether the Sun both rises and sets on this date.
    pub fn has_sunrise_and_sunset(&self) -> bool {
        self.sunrise_h.is_some() && self.sunset_h.is_some()
    }

    /// Solar position `hours` after 0h UT of this date.
    pub fn position_at(&self, hours: f64) -> SolarPosition {
        solar_position_at_jd(self.jd_midnight + hours / 24.0)
    }

    /// Time at which the Sun's centre crosses `altitude_deg`, before
    /// (`after_transit = false`) or after transit.
    pub fn time_for_altitude(&self, altitude_deg: f64, after_transit: bool) -> Option<f64> {
        let lat = self.coordinate.latitude_deg();
        self.refine(after_transit, |pos| {
            hour_angle_deg(altitude_deg, lat, pos.declination_deg)
        })
    }

    /// Afternoon time at which shadows reach `shadow_multiplier` × height
    /// plus the noon shadow (the Asr rule).
    pub fn afternoon(&self, shadow_multiplier: f64) -> Option<f64> {
        let lat = self.coordinate.latitude_deg();
        self.refine(true, |pos| {
            let altitude = asr_altitude_deg(shadow_multiplier, lat, pos.declination_deg);
            hour_angle_deg(altitude, lat, pos.declination_deg)
        })
    }

    /// Transit time implied by the equation of time in `pos`.
    fn transit_for(&self, pos: &SolarPosition) -> f64 {
        12.0 - pos.equation_of_time_min / 60.0 - self.coordinate.longitude_deg() / 15.0
    }

    fn refine<F>(&self, after_transit: bool, hour_angle: F) -> Option<f64>
    where
        F: Fn(&SolarPosition) -> Option<f64>,
    {
        let mut hours = self.transit_h;
        for _ in 0..MAX_ITERATIONS {
            let pos = self.position_at(hours);
            let offset = hour_angle(&pos)? / 15.0;
            let transit = self.transit_for(&pos);
            let next = if after_transit {
                transit + offset
            } else {
                transit - offset
            };
            let done = (next - hours).abs() < CONVERGENCE_HOURS;
            hours = next;
            if done {
                break;
            }
        }
        Some(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn mecca() -> Coordinate {
        Coordinate::new(21.4225, 39.8262).unwrap()
    }

    #[test]
    fn hour_angle_equator_equinox() {
        // φ = 0, δ = 0: cos H = sin(h0) → H slightly over 90°
        let h = hour_angle_deg(-0.8333, 0.0, 0.0).unwrap();
        assert!((h - 90.833).abs() < 0.01, "H = {h}");
    }

    #[test]
    fn hour_angle_polar_night() {
        // Tromsø (70°N) at the December solstice: never rises.
        assert!(hour_angle_deg(-0.8333, 70.0, -23.44).is_none());
    }

    #[test]
    fn hour_angle_midnight_sun() {
        assert!(hour_angle_deg(-0.8333, 70.0, 23.44).is_none());
    }

    #[test]
    fn hour_angle_at_pole_is_none() {
        assert!(hour_angle_deg(-18.0, 90.0, 10.0).is_none());
    }

    #[test]
    fn asr_altitude_shafi_equals_45_when_sun_overhead() {
        // Sun at zenith at noon: shadow length 1 → altitude 45°.
        let h = asr_altitude_deg(1.0, 10.0, 10.0);
        assert!((h - 45.0).abs() < 1e-9, "h = {h}");
    }

    #[test]
    fn asr_altitude_hanafi_lower() {
        let shafi = asr_altitude_deg(1.0, 40.0, 5.0);
        let hanafi = asr_altitude_deg(2.0, 40.0, 5.0);
        assert!(hanafi < shafi);
        assert!(hanafi > 0.0);
    }

    #[test]
    fn mecca_equinox_events() {
        let day = SolarDay::new(d(2024, 3, 20), mecca(), &HorizonConfig::default());
        // 09:28 UT transit, 03:24 UT sunrise, 15:32 UT sunset.
        assert!((day.transit_hours() - 9.467).abs() < 0.01, "{}", day.transit_hours());
        let rise = day.sunrise_hours().unwrap();
        let set = day.sunset_hours().unwrap();
        assert!((rise - 3.409).abs() < 0.02, "sunrise {rise}");
        assert!((set - 15.531).abs() < 0.02, "sunset {set}");
        assert!(day.has_sunrise_and_sunset());
    }

    #[test]
    fn events_ordered() {
        let day = SolarDay::new(d(2024, 6, 21), mecca(), &HorizonConfig::default());
        let dawn = day.time_for_altitude(-18.0, false).unwrap();
        let rise = day.sunrise_hours().unwrap();
        let noon = day.transit_hours();
        let asr = day.afternoon(1.0).unwrap();
        let set = day.sunset_hours().unwrap();
        let dusk = day.time_for_altitude(-18.0, true).unwrap();
        assert!(dawn < rise && rise < noon && noon < asr && asr < set && set < dusk);
    }

    #[test]
    fn polar_day_has_no_sunset() {
        let tromso = Coordinate::new(69.6492, 18.9553).unwrap();
        let day = SolarDay::new(d(2024, 6, 21), tromso, &HorizonConfig::default());
        assert!(day.sunset_hours().is_none());
        assert!(!day.has_sunrise_and_sunset());
        // Transit is always defined.
        assert!(day.transit_hours().is_finite());
    }

    #[test]
    fn hanafi_afternoon_later() {
        let day = SolarDay::new(d(2024, 3, 20), mecca(), &HorizonConfig::default());
        let shafi = day.afternoon(1.0).unwrap();
        let hanafi = day.afternoon(2.0).unwrap();
        assert!(hanafi > shafi, "hanafi {hanafi} <= shafi {shafi}");
    }
}
