//! Horizon depression for sunrise and sunset.
//!
//! Sunrise/sunset is the instant the Sun's upper limb touches the
//! apparent horizon: the geometric centre is then depressed by the
//! horizontal refraction plus the solar semidiameter (34′ + 16′ = 0.8333°),
//! and further by the geometric dip when the observer is elevated.

use std::f64::consts::PI;

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Configurable parameters for the sunrise/sunset altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semidiameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Observer elevation above the surrounding terrain in meters.
    /// Dip = sqrt(2h/R) radians. Default: 0.0 (sea-level horizon).
    pub elevation_m: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            elevation_m: 0.0,
        }
    }
}

impl HorizonConfig {
    /// Total horizon depression in degrees (positive below the horizon).
    ///
    /// `h0 = (refraction + semidiameter) / 60 + dip_deg`
    pub fn depression_deg(&self) -> f64 {
        let base = (self.refraction_arcmin + self.semidiameter_arcmin) / 60.0;
        if self.elevation_m > 0.0 {
            let dip_rad = (2.0 * self.elevation_m / EARTH_RADIUS_M).sqrt();
            base + dip_rad * (180.0 / PI)
        } else {
            base
        }
    }

    /// Solar centre altitude at sunrise/sunset in degrees (negative).
    pub fn sunrise_altitude_deg(&self) -> f64 {
        -self.depression_deg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depression() {
        let d = HorizonConfig::default().depression_deg();
        assert!((d - 0.8333).abs() < 0.001, "depression = {d}");
    }

    #[test]
    fn sunrise_altitude_negative() {
        assert!(HorizonConfig::default().sunrise_altitude_deg() < 0.0);
    }

    #[test]
    fn depression_1000m() {
        let c = HorizonConfig {
            elevation_m: 1000.0,
            ..Default::default()
        };
        let base = 50.0 / 60.0;
        let d = c.depression_deg();
        // Dip at 1000 m ≈ 1.015°
        assert!(d > base + 0.9, "1000m depression {d} should exceed base by ~1°");
        assert!(d < base + 1.2, "1000m depression {d} too large");
    }

    #[test]
    fn negative_elevation_ignored() {
        let c = HorizonConfig {
            elevation_m: -50.0,
            ..Default::default()
        };
        assert!((c.depression_deg() - 50.0 / 60.0).abs() < 1e-12);
    }
}
