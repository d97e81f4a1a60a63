//! Great-circle bearing and distance.

use std::f64::consts::PI;

use miqat_solar::{Coordinate, normalize_degrees};
use tracing::debug;

/// The Kaaba, Mecca.
pub const KAABA: Coordinate = Coordinate::new_unchecked(21.422487, 39.826206);

/// Mean Earth radius (IUGG), km.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Within this distance of a point or of its antipode the bearing is
/// reported as 0°.
pub const DEGENERATE_RADIUS_KM: f64 = 0.05;

/// Initial great-circle bearing from `from` to `to`, degrees clockwise
/// from true north in [0, 360).
///
/// Points within [`DEGENERATE_RADIUS_KM`] of `to` or of its antipode give 0°.
pub fn bearing_to(from: &Coordinate, to: &Coordinate) -> f64 {
    let d = great_circle_distance_km(from, to);
    if d < DEGENERATE_RADIUS_KM || d > PI * EARTH_RADIUS_KM - DEGENERATE_RADIUS_KM {
        debug!(%from, %to, distance_km = d, "degenerate bearing, reporting 0°");
        return 0.0;
    }
    let phi1 = from.latitude_rad();
    let phi2 = to.latitude_rad();
    let dlam = (to.longitude_deg() - from.longitude_deg()).to_radians();

    let y = dlam.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlam.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Bearing from `from` to the Kaaba.
pub fn qibla_bearing(from: &Coordinate) -> f64 {
    bearing_to(from, &KAABA)
}

/// Haversine distance in kilometres.
pub fn great_circle_distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let dphi = to.latitude_rad() - from.latitude_rad();
    let dlam = (to.longitude_deg() - from.longitude_deg()).to_radians();
    let a = (dphi / 2.0).sin().powi(2)
        + from.latitude_rad().cos() * to.latitude_rad().cos() * (dlam / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Distance to the Kaaba in kilometres.
pub fn distance_to_kaaba_km(from: &Coordinate) -> f64 {
    great_circle_distance_km(from, &KAABA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn cardinal_directions() {
        let origin = c(0.0, 0.0);
        assert!((bearing_to(&origin, &c(10.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_to(&origin, &c(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_to(&origin, &c(-10.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((bearing_to(&origin, &c(0.0, -10.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn at_kaaba_is_zero() {
        assert_eq!(qibla_bearing(&KAABA), 0.0);
        assert_eq!(distance_to_kaaba_km(&KAABA), 0.0);
    }

    #[test]
    fn near_kaaba_is_stable_zero() {
        assert_eq!(qibla_bearing(&c(21.4225, 39.8262)), 0.0);
        assert_eq!(qibla_bearing(&c(21.42249, 39.82621)), 0.0);
        assert!(distance_to_kaaba_km(&c(21.4225, 39.8262)) < DEGENERATE_RADIUS_KM);
    }

    #[test]
    fn just_outside_radius_has_direction() {
        // ~111 m due north of the Kaaba.
        let north = c(KAABA.latitude_deg() + 0.001, KAABA.longitude_deg());
        assert!((qibla_bearing(&north) - 180.0).abs() < 0.01);
    }

    #[test]
    fn near_antipode_is_zero() {
        let near = c(-KAABA.latitude_deg() + 0.0001, KAABA.longitude_deg() - 180.0);
        assert_eq!(qibla_bearing(&near), 0.0);
    }

    #[test]
    fn antipode_is_zero() {
        let antipode = c(-KAABA.latitude_deg(), KAABA.longitude_deg() - 180.0);
        assert_eq!(qibla_bearing(&antipode), 0.0);
        let d = distance_to_kaaba_km(&antipode);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 0.01);
    }

    #[test]
    fn known_cities() {
        // Published Qibla directions, ±0.5°.
        let cases = [
            (51.5074, -0.1278, 118.99),  // London
            (40.7128, -74.0060, 58.48),  // New York
            (-6.2088, 106.8456, 295.15), // Jakarta
            (-33.8688, 151.2093, 277.50), // Sydney
        ];
        for (lat, lon, want) in cases {
            let got = qibla_bearing(&c(lat, lon));
            assert!((got - want).abs() < 0.5, "{lat},{lon}: {got}");
        }
    }

    #[test]
    fn london_distance() {
        let d = distance_to_kaaba_km(&c(51.5074, -0.1278));
        assert!((d - 4_790.0).abs() < 20.0, "{d}");
    }
}
