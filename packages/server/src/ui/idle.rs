//! Per-connection idle timer.

use std::{pin::Pin, time::Duration};

use tokio::time::{Instant, Sleep, sleep};

/// Fires once a connection has been silent for `period`.
///
/// Owned by the connection task and polled in its `select!` loop, so dropping
/// the task cancels the timer.
#[derive(Debug)]
pub struct IdleTimer {
    period: Duration,
    sleep: Pin<Box<Sleep>>,
}

impl IdleTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            sleep: Box::pin(sleep(period)),
        }
    }

    /// Restart the countdown from now.
    pub fn reset(&mut self) {
        self.sleep.as_mut().reset(Instant::now() + self.period);
    }

    /// Resolves when the timer fires.
    pub async fn expired(&mut self) {
        self.sleep.as_mut().await;
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
