//! Daily prayer-time calculation.
//!
//! Order of operations for one date:
//! 1. Solve transit, sunrise and sunset (substituting a nearby latitude or
//!    date when the Sun does not cross the horizon, see [`crate::polar`]).
//! 2. Dhuhr = transit; Asr from the madhab's shadow rule; Maghrib = sunset.
//! 3. Fajr/Isha from the convention's twilight angles, bounded by the
//!    high-latitude rule.
//! 4. Apply method and user minute adjustments, round, and enforce a
//!    strictly increasing sequence.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use miqat_solar::Coordinate;
use miqat_time::utc_instant;
use tracing::{debug, warn};

use crate::convention::CalculationConvention;
use crate::madhab::Madhab;
use crate::params::{CalculationParameters, HighLatitudeRule, Rounding};
use crate::polar;
use crate::prayer::ALL_PRAYERS;
use crate::seasonal::{evening_twilight_minutes, morning_twilight_minutes};
use crate::times::{DailyPrayerTimes, FallbackNotes};

/// Beyond this |latitude| the seasonal rule caps Fajr/Isha at one
/// seventh of the night.
const SEVENTH_OF_NIGHT_LATITUDE: f64 = 55.0;

/// Prayer-time calculator bound to one set of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrayerTimeCalculator {
    params: CalculationParameters,
}

impl PrayerTimeCalculator {
    pub fn new(params: CalculationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CalculationParameters {
        &self.params
    }

    /// Prayer times for `date` at `coordinate`.
    ///
    /// Never fails and never yields NaN: polar and high-latitude days are
    /// resolved by the configured fallback rules.
    pub fn compute(&self, date: NaiveDate, coordinate: &Coordinate) -> DailyPrayerTimes {
        let p = &self.params;
        let days = polar::resolve(date, *coordinate, p.polar_resolution, &p.horizon);
        let mut notes = FallbackNotes {
            polar: days.substituted,
            ..Default::default()
        };

        let today = &days.today;
        let lat = today.coordinate().latitude_deg();
        let transit = today.transit_hours();
        let sunrise = today.sunrise_hours().unwrap_or(transit - 6.0);
        let sunset = today.sunset_hours().unwrap_or(transit + 6.0);
        let next_sunrise = days
            .tomorrow
            .sunrise_hours()
            .map_or(sunrise + 24.0, |h| h + 24.0);
        let night = (next_sunrise - sunset).max(0.0);

        let asr = today
            .afternoon(p.madhab.shadow_multiplier())
            .unwrap_or((transit + sunset) / 2.0);

        let seventh_rule = p.high_latitude_rule == HighLatitudeRule::SeasonalAdjustment
            && lat.abs() >= SEVENTH_OF_NIGHT_LATITUDE;

        let fajr_angle = p.convention.fajr_angle_deg();
        let mut fajr = today.time_for_altitude(-fajr_angle, false);
        if seventh_rule {
            fajr = Some(sunrise - night / 7.0);
            notes.fajr = true;
        }
        let safe_fajr = match p.high_latitude_rule.night_portion(fajr_angle) {
            None => sunrise - morning_twilight_minutes(date, lat) / 60.0,
            Some(portion) => sunrise - portion * night,
        };
        let fajr = match fajr {
            Some(t) if t >= safe_fajr => t,
            _ => {
                notes.fajr = true;
                safe_fajr
            }
        };

        let isha_angle = p.convention.isha_angle_deg();
        let mut isha = today.time_for_altitude(-isha_angle, true);
        if seventh_rule {
            isha = Some(sunset + night / 7.0);
            notes.isha = true;
        }
        let safe_isha = match p.high_latitude_rule.night_portion(isha_angle) {
            None => sunset + evening_twilight_minutes(date, lat, p.shafaq) / 60.0,
            Some(portion) => sunset + portion * night,
        };
        let isha = match isha {
            Some(t) if t <= safe_isha => t,
            _ => {
                notes.isha = true;
                safe_isha
            }
        };

        if notes.fajr || notes.isha {
            debug!(%date, %coordinate, ?notes, "twilight bounded by high-latitude rule");
        }

        let hours = [fajr, sunrise, transit, asr, sunset, isha];
        let adjustments = p.total_adjustments().as_array();
        let mut times: [DateTime<Utc>; 6] = std::array::from_fn(|i| {
            let h = hours[i] + f64::from(adjustments[i]) / 60.0;
            round_instant(utc_instant(date, h), p.rounding)
        });

        if enforce_strict_order(&mut times) {
            notes.reordered = true;
            warn!(%date, %coordinate, "prayer times out of order, nudged to keep sequence");
        }

        DailyPrayerTimes::from_array(date, times, notes)
    }

    /// Lazily project this calculator over `days` consecutive dates.
    pub fn project_range(
        &self,
        coordinate: Coordinate,
        start: NaiveDate,
        days: u32,
    ) -> crate::projection::WeeklyProjection {
        crate::projection::WeeklyProjection::new(*self, coordinate, start, days)
    }
}

/// One-shot calculation with default fallback policies.
pub fn compute_daily_times(
    date: NaiveDate,
    coordinate: &Coordinate,
    convention: CalculationConvention,
    madhab: Madhab,
) -> DailyPrayerTimes {
    PrayerTimeCalculator::new(CalculationParameters::new(convention, madhab)).compute(date, coordinate)
}

/// Round to whole minutes per `rounding`.
pub fn round_instant(t: DateTime<Utc>, rounding: Rounding) -> DateTime<Utc> {
    let secs = t.timestamp();
    let rem = secs.rem_euclid(60);
    let whole_minute = secs - rem;
    let rounded = match rounding {
        Rounding::None => return t,
        Rounding::Nearest if rem >= 30 => whole_minute + 60,
        Rounding::Nearest => whole_minute,
        Rounding::Up if rem == 0 && t.timestamp_subsec_nanos() == 0 => whole_minute,
        Rounding::Up => whole_minute + 60,
    };
    DateTime::from_timestamp(rounded, 0).unwrap_or(t)
}

/// Nudge each time to at least one minute after its predecessor.
///
/// Returns whether anything moved.
fn enforce_strict_order(times: &mut [DateTime<Utc>; 6]) -> bool {
    let mut moved = false;
    for i in 1..times.len() {
        if times[i] <= times[i - 1] {
            debug!(
                prayer = %ALL_PRAYERS[i],
                "boundary not after {}",
                ALL_PRAYERS[i - 1]
            );
            times[i] = times[i - 1] + Duration::minutes(1);
            moved = true;
        }
    }
    moved
}
