//! Snapshot types published by the prayer clock.

use chrono::{DateTime, Utc};
use miqat_prayer::Prayer;
use serde::Serialize;

/// Which window `now` falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// No coordinate or madhab yet.
    Unavailable,
    /// After local midnight, before today's Fajr.
    BeforeFajr,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl ClockPhase {
    pub fn from_prayer(prayer: Prayer) -> Self {
        match prayer {
            Prayer::Fajr => Self::Fajr,
            Prayer::Sunrise => Self::Sunrise,
            Prayer::Dhuhr => Self::Dhuhr,
            Prayer::Asr => Self::Asr,
            Prayer::Maghrib => Self::Maghrib,
            Prayer::Isha => Self::Isha,
        }
    }

    /// The prayer whose window this is, if any.
    pub fn prayer(self) -> Option<Prayer> {
        match self {
            Self::Unavailable | Self::BeforeFajr => None,
            Self::Fajr => Some(Prayer::Fajr),
            Self::Sunrise => Some(Prayer::Sunrise),
            Self::Dhuhr => Some(Prayer::Dhuhr),
            Self::Asr => Some(Prayer::Asr),
            Self::Maghrib => Some(Prayer::Maghrib),
            Self::Isha => Some(Prayer::Isha),
        }
    }
}

/// Clock behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockOptions {
    /// Treat Sunrise as a window of its own. When off, Fajr runs to Dhuhr.
    pub sunrise_is_state: bool,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            sunrise_is_state: true,
        }
    }
}

/// Current/next prayer at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockState {
    pub now: DateTime<Utc>,
    pub phase: ClockPhase,
    pub current_prayer: Option<Prayer>,
    pub next_prayer: Option<Prayer>,
    pub next_prayer_time: Option<DateTime<Utc>>,
    pub current_window_start: Option<DateTime<Utc>>,
    pub current_window_end: Option<DateTime<Utc>>,
    /// Milliseconds until `next_prayer_time`, never negative.
    pub time_left_ms: i64,
    /// Elapsed fraction of the current window, in [0, 1].
    pub progress: f64,
}

impl ClockState {
    /// State reported while the coordinate or madhab is unknown.
    pub fn neutral(now: DateTime<Utc>) -> Self {
        Self {
            now,
            phase: ClockPhase::Unavailable,
            current_prayer: None,
            next_prayer: None,
            next_prayer_time: None,
            current_window_start: None,
            current_window_end: None,
            time_left_ms: 0,
            progress: 0.0,
        }
    }

    /// State for `now` inside `[start, end)`, where `end` is `next`'s time.
    pub(crate) fn in_window(
        now: DateTime<Utc>,
        phase: ClockPhase,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        next: Prayer,
    ) -> Self {
        let time_left_ms = (end - now).num_milliseconds().max(0);
        let span = (end - start).num_milliseconds();
        let progress = if span > 0 {
            ((now - start).num_milliseconds() as f64 / span as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            now,
            phase,
            current_prayer: phase.prayer(),
            next_prayer: Some(next),
            next_prayer_time: Some(end),
            current_window_start: Some(start),
            current_window_end: Some(end),
            time_left_ms,
            progress,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.phase == ClockPhase::Unavailable
    }
}
