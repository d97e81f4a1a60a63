//! Real-time prayer clock.
//!
//! [`PrayerClock`] maps an instant to the prayer window containing it
//! (with `BeforeFajr` between local midnight and Fajr), the next boundary
//! and the time left. [`ClockTicker`] / [`run_ticker`] refresh it once a
//! second on a tokio task and publish [`ClockState`]s on a watch channel.

pub mod cache;
pub mod clock;
pub mod state;
pub mod ticker;

pub use cache::DEFAULT_CAPACITY;
pub use clock::PrayerClock;
pub use state::{ClockOptions, ClockPhase, ClockState};
pub use ticker::{AnchoredClock, ClockTicker, DEFAULT_TICK, SystemClock, WallClock, run_ticker};
