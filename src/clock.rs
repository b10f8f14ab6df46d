//! One-second pulse source for the game countdown.
//!
//! A [`Ticker`] owns a background tokio task that emits a tick per elapsed
//! period while running. It keeps no notion of time remaining; that is the
//! session's job. Every resume opens a new epoch and ticks produced under an
//! older epoch are dropped on receipt, so nothing emitted before a
//! [`Ticker::pause`] can be observed after it.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickerState {
    Running { epoch: u64 },
    Paused,
    Cancelled,
}

pub struct Ticker {
    control: watch::Sender<TickerState>,
    ticks: mpsc::Receiver<u64>,
    epoch: u64,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a running ticker on the current tokio runtime.
    pub fn start() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (control, control_rx) = watch::channel(TickerState::Running { epoch: 0 });
        let (tick_tx, ticks) = mpsc::channel(4);
        let task = tokio::spawn(run(period, control_rx, tick_tx));

        Self {
            control,
            ticks,
            epoch: 0,
            task,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.control.borrow(), TickerState::Running { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(*self.control.borrow(), TickerState::Cancelled)
    }

    /// Stop producing ticks until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if self.is_running() {
            self.control.send_replace(TickerState::Paused);
        }
    }

    /// Start producing ticks again, the first one a full period from now.
    pub fn resume(&mut self) {
        if matches!(*self.control.borrow(), TickerState::Paused) {
            self.epoch += 1;
            self.control.send_replace(TickerState::Running { epoch: self.epoch });
        }
    }

    /// Stop permanently.
    pub fn cancel(&mut self) {
        self.control.send_replace(TickerState::Cancelled);
        self.task.abort();
        self.ticks.close();
    }

    /// Wait for the next tick of the current epoch.
    ///
    /// Returns `None` once the ticker is cancelled. While paused this waits
    /// until the ticker is resumed.
    pub async fn tick(&mut self) -> Option<()> {
        loop {
            if self.is_cancelled() {
                return None;
            }
            let epoch = self.ticks.recv().await?;
            if *self.control.borrow() == (TickerState::Running { epoch }) {
                return Some(());
            }
            tracing::trace!(epoch, "Discarding stale tick");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    period: Duration,
    mut control: watch::Receiver<TickerState>,
    ticks: mpsc::Sender<u64>,
) {
    loop {
        let state = *control.borrow_and_update();
        match state {
            TickerState::Cancelled => return,
            TickerState::Paused => {
                if control.changed().await.is_err() {
                    return;
                }
            }
            TickerState::Running { epoch } => {
                let mut interval = time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            if ticks.send(epoch).await.is_err() {
                                return;
                            }
                        }
                        changed = control.changed() => {
                            if changed.is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        }
    }
}
