//! Resolution of days without sunrise or sunset.
//!
//! Above roughly 65.7° latitude the Sun can stay above (polar day) or
//! below (polar night) the horizon for a whole date, leaving sunrise,
//! sunset and everything anchored on them undefined. The resolver swaps
//! in the solar day of the nearest place or date where both today and
//! tomorrow have a sunrise and a sunset. Hours of the substitute day are
//! reused as hours after 0h UT of the requested date.

use chrono::{Duration, NaiveDate};
use miqat_solar::{Coordinate, HorizonConfig, SolarDay};
use tracing::debug;

use crate::params::PolarResolution;

/// Latitude step toward the equator for the nearest-latitude rule.
const LATITUDE_STEP_DEG: f64 = 0.5;

/// Furthest date offset tried by the nearest-day rule (half a year).
const MAX_DAY_OFFSET: i64 = 183;

/// Today's and tomorrow's solar days, possibly substituted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedDays {
    pub today: SolarDay,
    pub tomorrow: SolarDay,
    pub substituted: bool,
}

pub(crate) fn resolve(
    date: NaiveDate,
    coordinate: Coordinate,
    rule: PolarResolution,
    horizon: &HorizonConfig,
) -> ResolvedDays {
    if let Some(days) = valid_pair(date, coordinate, horizon) {
        return days;
    }

    let resolved = match rule {
        PolarResolution::AqrabBalad => nearest_latitude(date, coordinate, horizon),
        PolarResolution::AqrabYaum => nearest_day(date, coordinate, horizon)
            .unwrap_or_else(|| nearest_latitude(date, coordinate, horizon)),
    };
    debug!(
        %date,
        %coordinate,
        ?rule,
        substitute_date = %resolved.today.date(),
        substitute_latitude = resolved.today.coordinate().latitude_deg(),
        "no sunrise/sunset, using substitute solar day"
    );
    ResolvedDays {
        substituted: true,
        ..resolved
    }
}

fn valid_pair(
    date: NaiveDate,
    coordinate: Coordinate,
    horizon: &HorizonConfig,
) -> Option<ResolvedDays> {
    let today = SolarDay::new(date, coordinate, horizon);
    if !today.has_sunrise_and_sunset() {
        return None;
    }
    let tomorrow = SolarDay::new(date.succ_opt().unwrap_or(date), coordinate, horizon);
    if !tomorrow.has_sunrise_and_sunset() {
        return None;
    }
    Some(ResolvedDays {
        today,
        tomorrow,
        substituted: false,
    })
}

/// Walk the latitude toward the equator until both days are regular.
///
/// Terminates at the equator, where every date has a sunrise and sunset.
fn nearest_latitude(
    date: NaiveDate,
    coordinate: Coordinate,
    horizon: &HorizonConfig,
) -> ResolvedDays {
    let start = coordinate.latitude_deg();
    let sign = start.signum();
    let mut step = 1.0;
    loop {
        let mut lat = start - sign * step * LATITUDE_STEP_DEG;
        if lat * sign <= 0.0 {
            lat = 0.0;
        }
        let candidate = coordinate.with_latitude(lat);
        if let Some(days) = valid_pair(date, candidate, horizon) {
            return days;
        }
        if lat == 0.0 {
            // Unreachable for the Earth's obliquity; keep the equator day.
            let today = SolarDay::new(date, candidate, horizon);
            let tomorrow = SolarDay::new(date.succ_opt().unwrap_or(date), candidate, horizon);
            return ResolvedDays {
                today,
                tomorrow,
                substituted: true,
            };
        }
        step += 1.0;
    }
}

/// Search dates +1, −1, +2, −2, … for a regular pair at the same place.
fn nearest_day(
    date: NaiveDate,
    coordinate: Coordinate,
    horizon: &HorizonConfig,
) -> Option<ResolvedDays> {
    (1..=MAX_DAY_OFFSET)
        .flat_map(|offset| [offset, -offset])
        .filter_map(|offset| date.checked_add_signed(Duration::days(offset)))
        .find_map(|candidate| valid_pair(candidate, coordinate, horizon))
}
