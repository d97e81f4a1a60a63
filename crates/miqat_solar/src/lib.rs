//! Solar position engine for prayer-time and twilight calculations.
//!
//! This crate provides:
//! - [`Coordinate`], a validated observer location
//! - Sun declination, right ascension and equation of time for a date
//! - Hour-angle solving for an arbitrary solar altitude
//! - [`SolarDay`], the iteratively refined transit / rise / set / altitude
//!   times for one calendar date, in hours after 0h UT
//!
//! Sources: USNO "Approximate Solar Coordinates" series, Meeus
//! "Astronomical Algorithms" ch. 15 and 25. Accuracy of the series is
//! ~0.01° in declination, which keeps derived times within a minute
//! between ±65° latitude.

pub mod angle;
pub mod coordinate;
pub mod error;
pub mod horizon;
pub mod position;
pub mod solar_day;

pub use angle::{normalize_degrees, normalize_hours, normalize_signed_degrees};
pub use coordinate::Coordinate;
pub use error::CoordinateError;
pub use horizon::HorizonConfig;
pub use position::{SolarPosition, solar_position, solar_position_at_jd};
pub use solar_day::{SolarDay, asr_altitude_deg, hour_angle_deg};
