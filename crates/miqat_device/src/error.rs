//! Sensor and geolocation failures.

use std::time::Duration;

use thiserror::Error;

/// Heading sensor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HeadingError {
    #[error("Permission to access device orientation was denied")]
    PermissionDenied,
    #[error("Error requesting device orientation permission: {0}")]
    PromptFailed(String),
}

/// Geolocation failures. Any of them leaves the coordinate absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
    #[error("location request timed out after {0:?}")]
    Timeout(Duration),
}
