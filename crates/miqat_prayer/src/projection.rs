//! Multi-day projection of prayer times.

use std::iter::FusedIterator;

use chrono::{Days, NaiveDate};
use miqat_solar::Coordinate;

use crate::calculator::PrayerTimeCalculator;
use crate::madhab::Madhab;
use crate::params::CalculationParameters;
use crate::times::DailyPrayerTimes;

/// Lazy sequence of [`DailyPrayerTimes`] for consecutive dates.
///
/// Each item is computed on demand. A clone continues from the same
/// position.
#[derive(Debug, Clone)]
pub struct WeeklyProjection {
    calculator: PrayerTimeCalculator,
    coordinate: Coordinate,
    start: NaiveDate,
    next: u32,
    days: u32,
}

impl WeeklyProjection {
    pub fn new(
        calculator: PrayerTimeCalculator,
        coordinate: Coordinate,
        start: NaiveDate,
        days: u32,
    ) -> Self {
        Self {
            calculator,
            coordinate,
            start,
            next: 0,
            days,
        }
    }

    /// The seven days starting at `start`.
    pub fn week(calculator: PrayerTimeCalculator, coordinate: Coordinate, start: NaiveDate) -> Self {
        Self::new(calculator, coordinate, start, 7)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
}

impl Iterator for WeeklyProjection {
    type Item = DailyPrayerTimes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.days {
            return None;
        }
        let Some(date) = self.start.checked_add_days(Days::new(u64::from(self.next))) else {
            self.next = self.days;
            return None;
        };
        self.next += 1;
        Some(self.calculator.compute(date, &self.coordinate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.days - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for WeeklyProjection {}

impl FusedIterator for WeeklyProjection {}

/// Project Moonsighting Committee times for `madhab` over `days` dates.
pub fn project_range(
    coordinate: Coordinate,
    madhab: Madhab,
    start: NaiveDate,
    days: u32,
) -> WeeklyProjection {
    let calculator = PrayerTimeCalculator::new(CalculationParameters::moonsighting_committee(madhab));
    WeeklyProjection::new(calculator, coordinate, start, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn karachi() -> Coordinate {
        Coordinate::new(24.8607, 67.0011).unwrap()
    }

    #[test]
    fn consecutive_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
        let days: Vec<_> = project_range(karachi(), Madhab::Hanafi, start, 7)
            .map(|t| t.date)
            .collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], start);
        // Crosses the leap day.
        assert_eq!(days[3], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn exact_size() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut p = project_range(karachi(), Madhab::Shafi, start, 3);
        assert_eq!(p.len(), 3);
        p.next();
        assert_eq!(p.len(), 2);
        assert_eq!(p.by_ref().count(), 2);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn zero_days_is_empty() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(project_range(karachi(), Madhab::Shafi, start, 0).count(), 0);
    }

    #[test]
    fn clone_resumes_at_same_position() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut p = project_range(karachi(), Madhab::Shafi, start, 7);
        p.next();
        p.next();
        let mut q = p.clone();
        assert_eq!(p.next(), q.next());
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn matches_single_day_calculation() {
        let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let calc = PrayerTimeCalculator::default();
        for day in calc.project_range(karachi(), start, 7) {
            assert_eq!(day, calc.compute(day.date, &karachi()));
        }
    }
}
