//! One-shot geolocation with a bounded wait and a short-lived cache.

use std::future::Future;
use std::time::Duration;

use miqat_solar::Coordinate;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::LocationError;

/// Longest wait for a position.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Age up to which a previous position is reused.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Where a position request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    #[default]
    Idle,
    Prompt,
    Granted,
    Denied,
    Error,
}

/// Platform position lookup.
pub trait LocationProvider {
    fn current_position(&mut self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Serves a configured coordinate, or reports it unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedLocationProvider {
    coordinate: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_position(&mut self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send {
        let result = self
            .coordinate
            .ok_or_else(|| LocationError::Unavailable("no location configured".to_string()));
        std::future::ready(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub timeout: Duration,
    pub max_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Position requests through a provider.
#[derive(Debug)]
pub struct LocationService<P> {
    provider: P,
    options: LocationOptions,
    status: LocationStatus,
    last_error: Option<LocationError>,
    cached: Option<(Coordinate, Instant)>,
}

impl<P: LocationProvider> LocationService<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, LocationOptions::default())
    }

    pub fn with_options(provider: P, options: LocationOptions) -> Self {
        Self {
            provider,
            options,
            status: LocationStatus::Idle,
            last_error: None,
            cached: None,
        }
    }

    pub fn status(&self) -> LocationStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&LocationError> {
        self.last_error.as_ref()
    }

    /// The coordinate of the last successful request; absent after any
    /// failure.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.status {
            LocationStatus::Granted => self.cached.map(|(c, _)| c),
            _ => None,
        }
    }

    /// Request the current position, reusing one younger than
    /// `max_age` without asking the provider.
    pub async fn request(&mut self) -> Result<Coordinate, LocationError> {
        let fresh = self
            .cached
            .filter(|(_, at)| at.elapsed() <= self.options.max_age);
        if let Some((coordinate, _)) = fresh {
            debug!(%coordinate, "reusing cached position");
            self.status = LocationStatus::Granted;
            self.last_error = None;
            return Ok(coordinate);
        }

        self.status = LocationStatus::Prompt;
        let outcome = tokio::time::timeout(self.options.timeout, self.provider.current_position())
            .await
            .unwrap_or(Err(LocationError::Timeout(self.options.timeout)));

        match outcome {
            Ok(coordinate) => {
                debug!(%coordinate, "position acquired");
                self.cached = Some((coordinate, Instant::now()));
                self.status = LocationStatus::Granted;
                self.last_error = None;
                Ok(coordinate)
            }
            Err(err) => {
                warn!(error = %err, "position request failed");
                self.status = match err {
                    LocationError::PermissionDenied => LocationStatus::Denied,
                    _ => LocationStatus::Error,
                };
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
