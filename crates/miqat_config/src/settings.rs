//! Settings sections, one per TOML table. Every field has a default so a
//! partial (or empty) file is valid.

use std::time::Duration;

use chrono::FixedOffset;
use miqat_clock::ClockOptions;
use miqat_device::LocationOptions;
use miqat_prayer::{
    CalculationConvention, CalculationParameters, HighLatitudeRule, Madhab, PolarResolution,
    PrayerAdjustments, Rounding, Shafaq,
};
use miqat_solar::Coordinate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MiqatConfig {
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub prayer: PrayerSettings,
    #[serde(default)]
    pub clock: ClockSettings,
    #[serde(default)]
    pub qibla: QiblaSettings,
    #[serde(default)]
    pub geolocation: GeolocationSettings,
}

/// Observer position and the offset used for "today".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Minutes east of UTC. Derived from longitude when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerSettings {
    /// Free-text school label, e.g. "Hanafi" or "Shafi'i".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub madhab: Option<String>,
    /// "moonsighting_committee" or "custom".
    #[serde(default = "default_convention")]
    pub convention: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fajr_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isha_angle: Option<f64>,
    #[serde(default)]
    pub high_latitude_rule: HighLatitudeRule,
    #[serde(default)]
    pub polar_resolution: PolarResolution,
    #[serde(default)]
    pub shafaq: Shafaq,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default)]
    pub adjustments: PrayerAdjustments,
}

impl Default for PrayerSettings {
    fn default() -> Self {
        Self {
            madhab: None,
            convention: default_convention(),
            fajr_angle: None,
            isha_angle: None,
            high_latitude_rule: HighLatitudeRule::default(),
            polar_resolution: PolarResolution::default(),
            shafaq: Shafaq::default(),
            rounding: Rounding::default(),
            adjustments: PrayerAdjustments::default(),
        }
    }
}

fn default_convention() -> String {
    "moonsighting_committee".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSettings {
    #[serde(default = "default_true")]
    pub sunrise_is_state: bool,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            sunrise_is_state: true,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QiblaSettings {
    #[serde(default = "default_alignment_tolerance")]
    pub alignment_tolerance_deg: f64,
}

impl Default for QiblaSettings {
    fn default() -> Self {
        Self {
            alignment_tolerance_deg: default_alignment_tolerance(),
        }
    }
}

fn default_alignment_tolerance() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeolocationSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_age_secs() -> u64 {
    300
}

impl MiqatConfig {
    /// Configured coordinate; `None` unless both latitude and longitude
    /// are set.
    pub fn coordinate(&self) -> ConfigResult<Option<Coordinate>> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinate::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => Err(ConfigError::Invalid(
                "location needs both latitude and longitude".to_string(),
            )),
        }
    }

    /// Offset defining the local calendar date. Without an explicit
    /// value, whole hours from the longitude (15° per hour), else UTC.
    pub fn utc_offset(&self) -> ConfigResult<FixedOffset> {
        let minutes = match (self.location.utc_offset_minutes, self.location.longitude) {
            (Some(m), _) => m,
            (None, Some(lon)) => (lon / 15.0).round() as i32 * 60,
            (None, None) => 0,
        };
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            ConfigError::Invalid(format!("utc_offset_minutes out of range: {minutes}"))
        })
    }

    pub fn madhab(&self) -> Madhab {
        Madhab::from_profile_label(self.prayer.madhab.as_deref())
    }

    pub fn convention(&self) -> ConfigResult<CalculationConvention> {
        let p = &self.prayer;
        if p.convention.trim().eq_ignore_ascii_case("custom") {
            let (Some(fajr), Some(isha)) = (p.fajr_angle, p.isha_angle) else {
                return Err(ConfigError::Invalid(
                    "custom convention needs fajr_angle and isha_angle".to_string(),
                ));
            };
            return Ok(CalculationConvention::custom(fajr, isha)?);
        }
        Ok(p.convention.parse()?)
    }

    pub fn prayer_params(&self) -> ConfigResult<CalculationParameters> {
        let p = &self.prayer;
        Ok(CalculationParameters::new(self.convention()?, self.madhab())
            .with_high_latitude_rule(p.high_latitude_rule)
            .with_polar_resolution(p.polar_resolution)
            .with_shafaq(p.shafaq)
            .with_rounding(p.rounding)
            .with_adjustments(p.adjustments))
    }

    pub fn clock_options(&self) -> ClockOptions {
        ClockOptions {
            sunrise_is_state: self.clock.sunrise_is_state,
        }
    }

    /// Tick period, at least 10 ms.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.clock.tick_interval_ms.max(10))
    }

    pub fn location_options(&self) -> LocationOptions {
        LocationOptions {
            timeout: Duration::from_secs(self.geolocation.timeout_secs),
            max_age: Duration::from_secs(self.geolocation.max_age_secs),
        }
    }

    /// Check every conversion once, so errors surface at load time.
    pub fn validate(&self) -> ConfigResult<()> {
        self.coordinate()?;
        self.utc_offset()?;
        self.prayer_params()?;
        let tol = self.qibla.alignment_tolerance_deg;
        if !(tol.is_finite() && (0.0..=180.0).contains(&tol)) {
            return Err(ConfigError::Invalid(format!(
                "alignment_tolerance_deg must be within [0, 180], got {tol}"
            )));
        }
        Ok(())
    }
}
