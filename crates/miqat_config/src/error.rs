//! Errors raised while loading, parsing and saving configuration.

use std::io;
use std::path::PathBuf;

use miqat_prayer::PrayerError;
use miqat_solar::CoordinateError;
use thiserror::Error;

/// Errors while locating, reading or interpreting the configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid coordinate in config: {0}")]
    Coordinate(#[from] CoordinateError),

    #[error("invalid prayer settings: {0}")]
    Prayer(#[from] PrayerError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
