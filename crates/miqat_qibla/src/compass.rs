//! Live Qibla compass state.

use miqat_solar::Coordinate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bearing::{distance_to_kaaba_km, qibla_bearing};
use crate::pointer::{DEFAULT_ALIGNMENT_TOLERANCE_DEG, is_aligned, relative_pointer_angle};

/// What the compass shows for the latest heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QiblaReading {
    /// Qibla bearing, degrees from true north.
    pub bearing: f64,
    /// Device heading, when one is available.
    pub heading: Option<f64>,
    /// Pointer rotation in the device frame.
    pub relative: Option<f64>,
    /// `None` without a heading.
    pub aligned: Option<bool>,
    pub distance_km: f64,
}

/// Qibla bearing for a fixed location plus the most recent heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QiblaCompass {
    bearing: f64,
    distance_km: f64,
    tolerance_deg: f64,
    heading: Option<f64>,
}

impl QiblaCompass {
    pub fn new(location: &Coordinate) -> Self {
        Self {
            bearing: qibla_bearing(location),
            distance_km: distance_to_kaaba_km(location),
            tolerance_deg: DEFAULT_ALIGNMENT_TOLERANCE_DEG,
            heading: None,
        }
    }

    /// Non-finite or negative tolerances fall back to the default.
    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = if tolerance_deg.is_finite() && tolerance_deg >= 0.0 {
            tolerance_deg
        } else {
            DEFAULT_ALIGNMENT_TOLERANCE_DEG
        };
        self
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn tolerance_deg(&self) -> f64 {
        self.tolerance_deg
    }

    /// Record a device heading and return the updated reading.
    /// Non-finite headings are dropped.
    pub fn on_heading(&mut self, heading: f64) -> QiblaReading {
        if heading.is_finite() {
            self.heading = Some(heading);
        } else {
            debug!(heading, "ignoring non-finite heading");
        }
        self.reading()
    }

    /// The heading sensor is unavailable or access was refused; the
    /// bearing is still reported.
    pub fn heading_lost(&mut self) -> QiblaReading {
        if self.heading.take().is_some() {
            warn!("heading lost, showing static Qibla bearing");
        }
        self.reading()
    }

    pub fn reading(&self) -> QiblaReading {
        let relative = self.heading.map(|h| relative_pointer_angle(self.bearing, h));
        let aligned = self
            .heading
            .map(|h| is_aligned(h, self.bearing, self.tolerance_deg));
        QiblaReading {
            bearing: self.bearing,
            heading: self.heading,
            relative,
            aligned,
            distance_km: self.distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Coordinate {
        Coordinate::new(51.5074, -0.1278).unwrap()
    }

    #[test]
    fn no_heading_reports_bearing_only() {
        let c = QiblaCompass::new(&london());
        let r = c.reading();
        assert!((r.bearing - 118.99).abs() < 0.5);
        assert_eq!(r.heading, None);
        assert_eq!(r.relative, None);
        assert_eq!(r.aligned, None);
    }

    #[test]
    fn heading_updates() {
        let mut c = QiblaCompass::new(&london());
        let r = c.on_heading(c.bearing() + 3.0);
        assert_eq!(r.aligned, Some(true));
        assert!((r.relative.unwrap() - 357.0).abs() < 1e-9);

        let r = c.on_heading(0.0);
        assert_eq!(r.aligned, Some(false));
    }

    #[test]
    fn non_finite_heading_keeps_previous() {
        let mut c = QiblaCompass::new(&london());
        c.on_heading(100.0);
        let r = c.on_heading(f64::NAN);
        assert_eq!(r.heading, Some(100.0));
    }

    #[test]
    fn lost_heading_clears_alignment() {
        let mut c = QiblaCompass::new(&london()).with_tolerance(10.0);
        c.on_heading(120.0);
        let r = c.heading_lost();
        assert_eq!(r.aligned, None);
        assert!(r.bearing > 0.0);
    }

    #[test]
    fn bad_tolerance_uses_default() {
        let c = QiblaCompass::new(&london()).with_tolerance(f64::NAN);
        assert_eq!(c.tolerance_deg(), DEFAULT_ALIGNMENT_TOLERANCE_DEG);
    }
}
