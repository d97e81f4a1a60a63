//! Observer location on the Earth's surface.

use serde::Serialize;

use crate::angle::normalize_signed_degrees;
use crate::error::CoordinateError;

/// Geographic coordinate in degrees.
///
/// Latitude is north positive in [-90, 90]; longitude is east positive,
/// normalized into [-180, 180) so `lon` and `lon + 360` are the same point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl Coordinate {
    /// Validate and build a coordinate.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, CoordinateError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg: normalize_signed_degrees(longitude_deg),
        })
    }

    /// Build a coordinate from constants known to be in range.
    ///
    /// No validation or longitude normalization is performed.
    pub const fn new_unchecked(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Latitude in degrees, north positive.
    pub const fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Longitude in degrees, east positive.
    pub const fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Same longitude at a different latitude.
    ///
    /// Used by the nearest-latitude polar rule, which walks the latitude
    /// toward the equator. The latitude is clamped into [-90, 90].
    pub fn with_latitude(self, latitude_deg: f64) -> Self {
        Self {
            latitude_deg: latitude_deg.clamp(-90.0, 90.0),
            ..self
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude_deg < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude_deg < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{ns} {:.4}°{ew}",
            self.latitude_deg.abs(),
            self.longitude_deg.abs()
        )
    }
}
