//! Error types for prayer-time parameters.

use miqat_solar::CoordinateError;
use thiserror::Error;

/// Errors from building calculation parameters.
///
/// The calculation itself never fails: polar and high-latitude
/// conditions are resolved by fallback rules.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PrayerError {
    /// Invalid observer coordinate.
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] CoordinateError),
    /// Twilight angle must be a positive, finite depression below 90°.
    #[error("invalid {which} twilight angle: {value}")]
    InvalidTwilightAngle { which: &'static str, value: f64 },
    /// Unrecognized madhab name (strict parsing).
    #[error("unknown madhab: {0}")]
    UnknownMadhab(String),
    /// Unrecognized calculation convention name.
    #[error("unknown calculation convention: {0}")]
    UnknownConvention(String),
    /// Unrecognized high-latitude rule name.
    #[error("unknown high-latitude rule: {0}")]
    UnknownHighLatitudeRule(String),
}
