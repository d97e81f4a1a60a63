//! Daily Islamic prayer times from solar position.
//!
//! This crate provides:
//! - [`PrayerTimeCalculator`], producing six strictly increasing UTC
//!   boundaries (Fajr, Sunrise, Dhuhr, Asr, Maghrib, Isha) for a date and
//!   [`Coordinate`]
//! - Moonsighting Committee defaults: 18° twilight, seasonal Fajr/Isha
//!   bounds, +5 min Dhuhr and +3 min Maghrib
//! - Shafi and Hanafi Asr, custom twilight angles, per-prayer offsets
//! - High-latitude and polar fallbacks so that every date yields times
//! - [`WeeklyProjection`], a lazy multi-day iterator
//!
//! Calculation never fails once a valid [`Coordinate`] exists. Parsing of
//! convention, madhab and rule names does, see [`PrayerError`].

pub mod calculator;
pub mod convention;
pub mod error;
pub mod madhab;
pub mod params;
mod polar;
pub mod prayer;
pub mod projection;
pub mod seasonal;
pub mod times;

pub use calculator::{PrayerTimeCalculator, compute_daily_times, round_instant};
pub use convention::{CalculationConvention, PrayerAdjustments, Shafaq};
pub use error::PrayerError;
pub use madhab::Madhab;
pub use miqat_solar::Coordinate;
pub use params::{CalculationParameters, HighLatitudeRule, PolarResolution, Rounding};
pub use prayer::{ALL_PRAYERS, Prayer};
pub use projection::{WeeklyProjection, project_range};
pub use times::{DailyPrayerTimes, FallbackNotes};
