//! Jurisprudential school for the Asr shadow rule.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrayerError;

/// School of jurisprudence; only changes the Asr shadow length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Madhab {
    /// Shafi'i, Maliki, Hanbali: shadow equals object height.
    #[default]
    Shafi,
    /// Hanafi: shadow equals twice the object height.
    Hanafi,
}

impl Madhab {
    /// Shadow-length multiplier used by the Asr rule.
    pub const fn shadow_multiplier(self) -> f64 {
        match self {
            Self::Shafi => 1.0,
            Self::Hanafi => 2.0,
        }
    }

    /// Resolve a free-text profile label.
    ///
    /// Any label containing "hanafi" (case-insensitive) is Hanafi; every
    /// other label, and a missing one, is Shafi.
    pub fn from_profile_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.trim().to_lowercase().contains("hanafi") => Self::Hanafi,
            _ => Self::Shafi,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shafi => "Shafi",
            Self::Hanafi => "Hanafi",
        }
    }
}

impl Display for Madhab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Madhab {
    type Err = PrayerError;

    /// Strict parse: exactly "shafi" or "hanafi", any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shafi" => Ok(Self::Shafi),
            "hanafi" => Ok(Self::Hanafi),
            _ => Err(PrayerError::UnknownMadhab(s.to_string())),
        }
    }
}
