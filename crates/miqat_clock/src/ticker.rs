//! 1 Hz driver publishing clock states on a watch channel.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::clock::{PrayerClock, log_transition};
use crate::state::ClockState;

/// Refresh period of the live clock.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Source of wall-clock time.
pub trait WallClock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall time that starts at a chosen instant and advances with the tokio
/// clock. Under a paused runtime it advances only as tokio time does.
#[derive(Debug, Clone, Copy)]
pub struct AnchoredClock {
    anchor: DateTime<Utc>,
    started: Instant,
}

impl AnchoredClock {
    pub fn starting_at(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            started: Instant::now(),
        }
    }
}

impl WallClock for AnchoredClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.started.elapsed()).unwrap_or(chrono::Duration::zero());
        self.anchor + elapsed
    }
}

/// Drive `clock` every `period` until `cancel` fires or every receiver
/// is gone, then hand the clock back.
pub async fn run_ticker<W: WallClock>(
    mut clock: PrayerClock,
    wall: W,
    period: Duration,
    tx: watch::Sender<ClockState>,
    cancel: CancellationToken,
) -> PrayerClock {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut previous: Option<ClockState> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("prayer clock ticker cancelled");
                break;
            }
            _ = interval.tick() => {
                let state = clock.state_at(wall.now());
                trace!(now = %state.now, phase = ?state.phase, left_ms = state.time_left_ms, "tick");
                log_transition(previous.as_ref(), &state);
                previous = Some(state);
                if tx.send(state).is_err() {
                    debug!("no clock receivers left, stopping ticker");
                    break;
                }
            }
        }
    }
    clock
}

/// Handle to a spawned ticker task.
#[derive(Debug)]
pub struct ClockTicker {
    receiver: watch::Receiver<ClockState>,
    cancel: CancellationToken,
    task: JoinHandle<PrayerClock>,
}

impl ClockTicker {
    /// Spawn a ticker on the current tokio runtime. The receiver starts
    /// with the state at spawn time.
    pub fn spawn<W: WallClock>(mut clock: PrayerClock, wall: W, period: Duration) -> Self {
        let initial = clock.state_at(wall.now());
        let (tx, receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_ticker(clock, wall, period, tx, cancel.clone()));
        Self {
            receiver,
            cancel,
            task,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockState> {
        self.receiver.clone()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the ticker and return its clock, or `None` if the task
    /// panicked.
    pub async fn stop(self) -> Option<PrayerClock> {
        self.cancel.cancel();
        self.task.await.ok()
    }
}
