//! Periodic tick source for the multiplexed variants
//! Generates regular TickMessage events on a bounded queue

use crate::messages::TickMessage;
use chrono::{DateTime, Utc};
use std::time::SystemTime;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Ticks queued for a slow consumer; later ones are dropped
const TICK_BUF: usize = 1;

/// Handle on a running ticker task.  The task is aborted by `stop()` or on drop
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking every `period`, first tick one period from now
    pub fn start(period: Duration) -> (Self, mpsc::Receiver<TickMessage>) {
        let (sender, receiver) = mpsc::channel(TICK_BUF);

        let handle = tokio::spawn(async move {
            let start_instant = Instant::now();
            let start_system = SystemTime::now();

            let mut interval = interval_at(start_instant + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut number = 0u64;

            loop {
                let scheduled_instant = interval.tick().await;

                // Get wall clock equivalent for this
                let wall_clock = start_system + scheduled_instant.duration_since(start_instant);
                let message = TickMessage {
                    time: DateTime::<Utc>::from(wall_clock),
                    number,
                };

                match sender.try_send(message) {
                    Ok(()) => debug!("Ticker sent tick {number}"),
                    Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }

                number += 1;
            }
        });

        (Self { handle }, receiver)
    }

    /// Cancel the ticker task; at most one buffered tick remains
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
