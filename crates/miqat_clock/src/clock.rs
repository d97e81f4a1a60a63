//! Current/next prayer state machine.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use miqat_prayer::{
    CalculationParameters, Coordinate, DailyPrayerTimes, Madhab, Prayer, PrayerTimeCalculator,
};
use tracing::debug;

use crate::cache::{DEFAULT_CAPACITY, DayCache};
use crate::state::{ClockOptions, ClockPhase, ClockState};

/// Tracks which prayer window contains a given instant.
///
/// "Today" is the calendar date of the instant in `offset`. Days are
/// computed on first use and memoized; yesterday and tomorrow are only
/// computed when a window reaches into them.
#[derive(Debug, Clone)]
pub struct PrayerClock {
    params: CalculationParameters,
    coordinate: Option<Coordinate>,
    madhab: Option<Madhab>,
    offset: FixedOffset,
    options: ClockOptions,
    cache: DayCache,
}

impl PrayerClock {
    /// Clock without coordinate or madhab; it reports neutral states
    /// until both are set.
    pub fn new(params: CalculationParameters, offset: FixedOffset) -> Self {
        Self {
            params,
            coordinate: None,
            madhab: None,
            offset,
            options: ClockOptions::default(),
            cache: DayCache::new(DEFAULT_CAPACITY),
        }
    }

    /// Clock ready to report for `coordinate` with `params.madhab`.
    pub fn for_location(
        params: CalculationParameters,
        coordinate: Coordinate,
        offset: FixedOffset,
    ) -> Self {
        let mut clock = Self::new(params, offset);
        clock.coordinate = Some(coordinate);
        clock.madhab = Some(params.madhab);
        clock
    }

    pub fn with_options(mut self, options: ClockOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ClockOptions {
        self.options
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn madhab(&self) -> Option<Madhab> {
        self.madhab
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn set_coordinate(&mut self, coordinate: Option<Coordinate>) {
        if self.coordinate != coordinate {
            self.coordinate = coordinate;
            self.cache.clear();
        }
    }

    pub fn set_madhab(&mut self, madhab: Option<Madhab>) {
        if self.madhab != madhab {
            self.madhab = madhab;
            self.cache.clear();
        }
    }

    /// Prayer times of `date` for the current inputs, if both are known.
    pub fn day(&mut self, date: NaiveDate) -> Option<DailyPrayerTimes> {
        let coordinate = self.coordinate?;
        let madhab = self.madhab?;
        let calculator = PrayerTimeCalculator::new(self.params.with_madhab(madhab));
        Some(self.cache.get_or_compute(date, &calculator, &coordinate))
    }

    /// Calendar date of `now` in the clock's offset.
    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    /// State at `now`; neutral when the coordinate or madhab is absent.
    pub fn state_at(&mut self, now: DateTime<Utc>) -> ClockState {
        self.resolve(now).unwrap_or_else(|| ClockState::neutral(now))
    }

    fn resolve(&mut self, now: DateTime<Utc>) -> Option<ClockState> {
        let mut date = self.local_date(now);

        // An offset far from local solar time can push a window across
        // local midnight; follow the instant into the neighbouring day.
        for _ in 0..2 {
            let today = self.day(date)?;
            if now < today.fajr {
                let yesterday = self.day(date.pred_opt()?)?;
                if now < yesterday.isha {
                    date = yesterday.date;
                    continue;
                }
            } else if now >= today.isha {
                let tomorrow = self.day(date.succ_opt()?)?;
                if now >= tomorrow.fajr {
                    date = tomorrow.date;
                    continue;
                }
            }
            break;
        }

        let today = self.day(date)?;
        if now < today.fajr {
            let yesterday = self.day(date.pred_opt()?)?;
            return Some(ClockState::in_window(
                now,
                ClockPhase::BeforeFajr,
                yesterday.isha,
                today.fajr,
                Prayer::Fajr,
            ));
        }

        let boundaries = self.boundaries(&today);
        let idx = boundaries
            .iter()
            .rposition(|(_, at)| now >= *at)
            .unwrap_or(0);
        let (current, start) = boundaries[idx];
        let state = match boundaries.get(idx + 1) {
            Some(&(next, end)) => {
                ClockState::in_window(now, ClockPhase::from_prayer(current), start, end, next)
            }
            None => {
                let tomorrow = self.day(date.succ_opt()?)?;
                ClockState::in_window(
                    now,
                    ClockPhase::from_prayer(current),
                    start,
                    tomorrow.fajr,
                    Prayer::Fajr,
                )
            }
        };
        Some(state)
    }

    fn boundaries(&self, day: &DailyPrayerTimes) -> Vec<(Prayer, DateTime<Utc>)> {
        let sunrise_is_state = self.options.sunrise_is_state;
        day.iter()
            .filter(|(p, _)| sunrise_is_state || *p != Prayer::Sunrise)
            .collect()
    }
}

/// Log phase changes between two consecutive states.
pub(crate) fn log_transition(previous: Option<&ClockState>, state: &ClockState) {
    if previous.is_some_and(|p| p.phase != state.phase) {
        debug!(now = %state.now, phase = ?state.phase, next = ?state.next_prayer, "prayer window changed");
    }
}
