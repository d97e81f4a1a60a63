//! Error types for observer input.

use thiserror::Error;

/// Rejected observer coordinate.
///
/// Coordinates come from device geolocation or configuration; the data
/// layer must never pass these, so they surface loudly instead of being
/// absorbed by a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinate component is not a finite number")]
    NonFinite,
    /// Latitude outside [-90, 90] degrees.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}
