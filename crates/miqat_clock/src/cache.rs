//! Bounded memo of computed days.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use miqat_prayer::{Coordinate, DailyPrayerTimes, PrayerTimeCalculator};
use tracing::debug;

/// Days kept before the one furthest from the requested date is dropped.
pub const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub(crate) struct DayCache {
    days: BTreeMap<NaiveDate, DailyPrayerTimes>,
    capacity: usize,
}

impl DayCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            days: BTreeMap::new(),
            capacity: capacity.max(3),
        }
    }

    pub fn get_or_compute(
        &mut self,
        date: NaiveDate,
        calculator: &PrayerTimeCalculator,
        coordinate: &Coordinate,
    ) -> DailyPrayerTimes {
        if let Some(day) = self.days.get(&date) {
            return *day;
        }
        let day = calculator.compute(date, coordinate);
        debug!(%date, %coordinate, "prayer day computed");
        if self.days.len() >= self.capacity {
            self.evict_furthest_from(date);
        }
        self.days.insert(date, day);
        day
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    fn evict_furthest_from(&mut self, date: NaiveDate) {
        let furthest = self
            .days
            .keys()
            .copied()
            .max_by_key(|d| (*d - date).num_days().abs());
        if let Some(d) = furthest {
            self.days.remove(&d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_and_keeps_neighbours() {
        let calc = PrayerTimeCalculator::default();
        let c = Coordinate::new(30.0444, 31.2357).unwrap();
        let mut cache = DayCache::new(3);
        let base = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        for offset in 0..10 {
            let d = base + chrono::Duration::days(offset);
            cache.get_or_compute(d, &calc, &c);
            assert!(cache.len() <= 3);
        }
        let last = base + chrono::Duration::days(9);
        assert!(cache.days.contains_key(&last));
        assert!(!cache.days.contains_key(&base));
    }

    #[test]
    fn memoized_value_is_identical() {
        let calc = PrayerTimeCalculator::default();
        let c = Coordinate::new(30.0444, 31.2357).unwrap();
        let mut cache = DayCache::new(DEFAULT_CAPACITY);
        let d = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let a = cache.get_or_compute(d, &calc, &c);
        let b = cache.get_or_compute(d, &calc, &c);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }
}
