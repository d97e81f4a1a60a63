//! One day's prayer boundaries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::prayer::{ALL_PRAYERS, Prayer};

/// Which fallbacks shaped a day's times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FallbackNotes {
    /// Sunrise/sunset came from a substituted latitude or date.
    pub polar: bool,
    /// Fajr came from the high-latitude bound instead of the angle.
    pub fajr: bool,
    /// Isha came from the high-latitude bound instead of the angle.
    pub isha: bool,
    /// At least one time was nudged to keep the order strict.
    pub reordered: bool,
}

impl FallbackNotes {
    pub fn any(&self) -> bool {
        self.polar || self.fajr || self.isha || self.reordered
    }
}

/// Six strictly increasing UTC instants for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPrayerTimes {
    pub date: NaiveDate,
    pub fajr: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub dhuhr: DateTime<Utc>,
    pub asr: DateTime<Utc>,
    pub maghrib: DateTime<Utc>,
    pub isha: DateTime<Utc>,
    pub fallback: FallbackNotes,
}

impl DailyPrayerTimes {
    /// Build from an array in Fajr..Isha order.
    pub(crate) fn from_array(
        date: NaiveDate,
        times: [DateTime<Utc>; 6],
        fallback: FallbackNotes,
    ) -> Self {
        let [fajr, sunrise, dhuhr, asr, maghrib, isha] = times;
        Self {
            date,
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
            fallback,
        }
    }

    /// Times in Fajr..Isha order.
    pub fn as_array(&self) -> [DateTime<Utc>; 6] {
        [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.maghrib,
            self.isha,
        ]
    }

    /// `(prayer, time)` pairs in daily order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        ALL_PRAYERS.iter().map(move |&p| (p, self.time_for(p)))
    }

    /// Boundary time of `prayer`.
    pub fn time_for(&self, prayer: Prayer) -> DateTime<Utc> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Last boundary reached at `at`; `None` before Fajr.
    pub fn current_prayer(&self, at: DateTime<Utc>) -> Option<Prayer> {
        ALL_PRAYERS
            .iter()
            .rev()
            .copied()
            .find(|&p| at >= self.time_for(p))
    }

    /// First boundary strictly after `at`; `None` once Isha has begun.
    pub fn next_prayer(&self, at: DateTime<Utc>) -> Option<Prayer> {
        ALL_PRAYERS.iter().copied().find(|&p| at < self.time_for(p))
    }

    /// Boundary before the current one; `None` before Sunrise.
    pub fn previous_prayer(&self, at: DateTime<Utc>) -> Option<Prayer> {
        self.current_prayer(at).and_then(Prayer::previous)
    }

    /// Whether every boundary is strictly later than the one before.
    pub fn is_strictly_increasing(&self) -> bool {
        self.as_array().windows(2).all(|w| w[0] < w[1])
    }
}
