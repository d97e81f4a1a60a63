//! Twilight-angle calculation conventions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrayerError;

/// Per-prayer minute offsets applied after the astronomical solve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerAdjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl PrayerAdjustments {
    /// Element-wise sum.
    pub fn plus(self, other: Self) -> Self {
        Self {
            fajr: self.fajr + other.fajr,
            sunrise: self.sunrise + other.sunrise,
            dhuhr: self.dhuhr + other.dhuhr,
            asr: self.asr + other.asr,
            maghrib: self.maghrib + other.maghrib,
            isha: self.isha + other.isha,
        }
    }

    /// Offsets in Fajr..Isha order.
    pub fn as_array(&self) -> [i32; 6] {
        [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.maghrib,
            self.isha,
        ]
    }
}

/// Evening-twilight flavour used by the Moonsighting Committee seasonal
/// Isha rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shafaq {
    /// Blend of red and white twilight; the committee's default.
    #[default]
    General,
    /// Red twilight (earlier Isha).
    Ahmer,
    /// White twilight (later Isha).
    Abyad,
}

/// Named method selecting Fajr/Isha depression angles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationConvention {
    /// Moonsighting Committee Worldwide: 18° / 18°, Dhuhr +5 min,
    /// Maghrib +3 min, seasonal high-latitude bounds.
    #[default]
    MoonsightingCommittee,
    /// Caller-supplied angles. Build with [`CalculationConvention::custom`].
    Custom {
        fajr_angle_deg: f64,
        isha_angle_deg: f64,
    },
}

impl CalculationConvention {
    /// Custom angles, each a positive depression below the horizon.
    pub fn custom(fajr_angle_deg: f64, isha_angle_deg: f64) -> Result<Self, PrayerError> {
        validate_angle("fajr", fajr_angle_deg)?;
        validate_angle("isha", isha_angle_deg)?;
        Ok(Self::Custom {
            fajr_angle_deg,
            isha_angle_deg,
        })
    }

    /// Fajr depression angle in degrees below the horizon.
    pub fn fajr_angle_deg(&self) -> f64 {
        match *self {
            Self::MoonsightingCommittee => 18.0,
            Self::Custom { fajr_angle_deg, .. } => fajr_angle_deg,
        }
    }

    /// Isha depression angle in degrees below the horizon.
    pub fn isha_angle_deg(&self) -> f64 {
        match *self {
            Self::MoonsightingCommittee => 18.0,
            Self::Custom { isha_angle_deg, .. } => isha_angle_deg,
        }
    }

    /// Fixed offsets the method itself prescribes.
    pub fn method_adjustments(&self) -> PrayerAdjustments {
        match self {
            Self::MoonsightingCommittee => PrayerAdjustments {
                dhuhr: 5,
                maghrib: 3,
                ..Default::default()
            },
            Self::Custom { .. } => PrayerAdjustments::default(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoonsightingCommittee => "Moonsighting Committee",
            Self::Custom { .. } => "Custom",
        }
    }

    /// Re-check the angle invariant, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), PrayerError> {
        validate_angle("fajr", self.fajr_angle_deg())?;
        validate_angle("isha", self.isha_angle_deg())
    }
}

impl FromStr for CalculationConvention {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "moonsightingcommittee" | "moonsighting" | "msc" => Ok(Self::MoonsightingCommittee),
            _ => Err(PrayerError::UnknownConvention(s.to_string())),
        }
    }
}

fn validate_angle(which: &'static str, value: f64) -> Result<(), PrayerError> {
    if value.is_finite() && value > 0.0 && value < 90.0 {
        Ok(())
    } else {
        Err(PrayerError::InvalidTwilightAngle { which, value })
    }
}
