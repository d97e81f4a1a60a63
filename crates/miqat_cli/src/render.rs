//! Text and JSON rendering of command results.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use miqat_clock::{ClockPhase, ClockState};
use miqat_prayer::DailyPrayerTimes;
use miqat_qibla::QiblaReading;
use miqat_solar::{Coordinate, SolarDay, solar_position};
use miqat_time::utc_instant;
use serde::Serialize;

/// Solar quantities for one date.
#[derive(Debug, Clone, Serialize)]
pub struct SolarReport {
    pub date: NaiveDate,
    pub declination_deg: f64,
    pub equation_of_time_min: f64,
    pub right_ascension_h: f64,
    pub transit: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl SolarReport {
    pub fn new(date: NaiveDate, coordinate: &Coordinate, day: &SolarDay) -> Self {
        let pos = solar_position(date, coordinate);
        Self {
            date,
            declination_deg: pos.declination_deg,
            equation_of_time_min: pos.equation_of_time_min,
            right_ascension_h: pos.right_ascension_h,
            transit: utc_instant(date, day.transit_hours()),
            sunrise: day.sunrise_hours().map(|h| utc_instant(date, h)),
            sunset: day.sunset_hours().map(|h| utc_instant(date, h)),
        }
    }
}

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn hm(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format("%H:%M").to_string()
}

/// `h:mm:ss` for a non-negative millisecond count.
pub fn countdown(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

pub fn day_table(day: &DailyPrayerTimes, offset: FixedOffset) -> String {
    let mut out = format!("{}\n", day.date);
    for (prayer, at) in day.iter() {
        out.push_str(&format!("  {:<8} {}\n", prayer.name(), hm(at, offset)));
    }
    let notes = day.fallback;
    if notes.any() {
        let mut used = Vec::new();
        if notes.polar {
            used.push("polar substitute");
        }
        if notes.fajr {
            used.push("fajr bound");
        }
        if notes.isha {
            used.push("isha bound");
        }
        if notes.reordered {
            used.push("reordered");
        }
        out.push_str(&format!("  ({})\n", used.join(", ")));
    }
    out
}

pub fn week_table(days: &[DailyPrayerTimes], offset: FixedOffset) -> String {
    let mut out = String::from("date        fajr  sunr  dhuhr asr   magh  isha\n");
    for d in days {
        let cols: Vec<String> = d.as_array().iter().map(|t| hm(*t, offset)).collect();
        out.push_str(&format!("{}  {}\n", d.date, cols.join(" ")));
    }
    out
}

pub fn clock_line(state: &ClockState, offset: FixedOffset) -> String {
    if state.phase == ClockPhase::Unavailable {
        return format!("{}  location unavailable", hm(state.now, offset));
    }
    let current = state.current_prayer.map_or("—", |p| p.name());
    let next = match (state.next_prayer, state.next_prayer_time) {
        (Some(p), Some(at)) => format!("{} at {}", p.name(), hm(at, offset)),
        _ => "—".to_string(),
    };
    format!(
        "{}  now: {current}  next: {next}  in {}  [{:>3.0}%]",
        state.now.with_timezone(&offset).format("%H:%M:%S"),
        countdown(state.time_left_ms),
        state.progress * 100.0
    )
}

pub fn qibla_text(reading: &QiblaReading) -> String {
    let mut out = format!(
        "Qibla {:.1}° from true north, {:.0} km to the Kaaba",
        reading.bearing, reading.distance_km
    );
    if let (Some(heading), Some(relative), Some(aligned)) =
        (reading.heading, reading.relative, reading.aligned)
    {
        out.push_str(&format!(
            "\nheading {heading:.1}°, turn pointer {relative:.1}°{}",
            if aligned { " (aligned)" } else { "" }
        ));
    }
    out
}

pub fn solar_text(report: &SolarReport, offset: FixedOffset) -> String {
    let event = |t: Option<DateTime<Utc>>| t.map_or("none".to_string(), |t| hm(t, offset));
    format!(
        "{}\n  declination    {:+.3}°\n  equation of time {:+.2} min\n  transit        {}\n  sunrise        {}\n  sunset         {}",
        report.date,
        report.declination_deg,
        report.equation_of_time_min,
        hm(report.transit, offset),
        event(report.sunrise),
        event(report.sunset),
    )
}
