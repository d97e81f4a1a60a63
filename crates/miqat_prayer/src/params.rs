//! Calculation parameters: convention, madhab and fallback policies.

use std::str::FromStr;

use miqat_solar::HorizonConfig;
use serde::{Deserialize, Serialize};

use crate::convention::{CalculationConvention, PrayerAdjustments, Shafaq};
use crate::error::PrayerError;
use crate::madhab::Madhab;

/// How Fajr and Isha are bounded when the twilight angle is never
/// reached, or reached unreasonably far from sunrise/sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeRule {
    /// Moonsighting Committee seasonal minutes, and one seventh of the
    /// night beyond 55° latitude.
    #[default]
    SeasonalAdjustment,
    /// Fajr/Isha no further than half the night from sunrise/sunset.
    MiddleOfTheNight,
    /// Fajr/Isha no further than one seventh of the night.
    SeventhOfTheNight,
    /// Fajr/Isha no further than `angle / 60` of the night.
    TwilightAngle,
}

impl HighLatitudeRule {
    /// Fraction of the night bounding a twilight of `angle_deg`, for the
    /// night-portion rules. `None` for the seasonal rule.
    pub fn night_portion(self, angle_deg: f64) -> Option<f64> {
        match self {
            Self::SeasonalAdjustment => None,
            Self::MiddleOfTheNight => Some(0.5),
            Self::SeventhOfTheNight => Some(1.0 / 7.0),
            Self::TwilightAngle => Some(angle_deg / 60.0),
        }
    }
}

impl FromStr for HighLatitudeRule {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "seasonal_adjustment" | "seasonal" => Ok(Self::SeasonalAdjustment),
            "middle_of_the_night" | "middle" => Ok(Self::MiddleOfTheNight),
            "seventh_of_the_night" | "seventh" => Ok(Self::SeventhOfTheNight),
            "twilight_angle" | "angle" => Ok(Self::TwilightAngle),
            _ => Err(PrayerError::UnknownHighLatitudeRule(s.to_string())),
        }
    }
}

/// How a day without sunrise or sunset (polar day/night) is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarResolution {
    /// Nearest latitude toward the equator with a sunrise and sunset.
    #[default]
    AqrabBalad,
    /// Nearest date with a sunrise and sunset at the same place.
    AqrabYaum,
}

/// Rounding of the final times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Nearest minute, half-minutes rounding up.
    #[default]
    Nearest,
    /// Next whole minute.
    Up,
    /// Keep the solved instant (millisecond resolution).
    None,
}

/// Everything besides date and coordinate that shapes a day's times.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalculationParameters {
    pub convention: CalculationConvention,
    pub madhab: Madhab,
    pub high_latitude_rule: HighLatitudeRule,
    pub polar_resolution: PolarResolution,
    pub shafaq: Shafaq,
    pub rounding: Rounding,
    /// User offsets, added on top of the convention's own adjustments.
    pub adjustments: PrayerAdjustments,
    pub horizon: HorizonConfig,
}

impl CalculationParameters {
    /// Defaults of `convention` with the given madhab.
    pub fn new(convention: CalculationConvention, madhab: Madhab) -> Self {
        Self {
            convention,
            madhab,
            ..Default::default()
        }
    }

    /// Moonsighting Committee with the given madhab.
    pub fn moonsighting_committee(madhab: Madhab) -> Self {
        Self::new(CalculationConvention::MoonsightingCommittee, madhab)
    }

    pub fn with_madhab(self, madhab: Madhab) -> Self {
        Self { madhab, ..self }
    }

    pub fn with_high_latitude_rule(self, high_latitude_rule: HighLatitudeRule) -> Self {
        Self {
            high_latitude_rule,
            ..self
        }
    }

    pub fn with_polar_resolution(self, polar_resolution: PolarResolution) -> Self {
        Self {
            polar_resolution,
            ..self
        }
    }

    pub fn with_shafaq(self, shafaq: Shafaq) -> Self {
        Self { shafaq, ..self }
    }

    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    pub fn with_adjustments(self, adjustments: PrayerAdjustments) -> Self {
        Self {
            adjustments,
            ..self
        }
    }

    /// Convention adjustments plus user adjustments.
    pub fn total_adjustments(&self) -> PrayerAdjustments {
        self.convention.method_adjustments().plus(self.adjustments)
    }
}
