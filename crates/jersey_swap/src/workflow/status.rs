use std::{future::Future, time::Duration};

use tokio::time::{interval, Interval, MissedTickBehavior};

/// Advisory messages shown while a generation call is pending.
pub const PROCESSING_MESSAGES: [&str; 11] = [
    "Analyzing player pose...",
    "Detecting original jersey...",
    "Mapping new jersey texture...",
    "Applying realistic folds and shadows...",
    "Blending colors seamlessly...",
    "Preserving background details...",
    "Finalizing the swap...",
    "Analyzing new background...",
    "Matching lighting and perspective...",
    "Casting realistic shadows...",
    "Compositing final image...",
];

/// Rotation of [`PROCESSING_MESSAGES`] on a fixed period.
///
/// Purely cosmetic; nothing here reads or writes session state.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingStatus {
    period: Duration,
}

impl ProcessingStatus {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Message shown after `elapsed` time in the processing state.
    pub fn message_at(&self, elapsed: Duration) -> &'static str {
        let period = self.period.as_millis().max(1);
        let index = (elapsed.as_millis() / period) as usize % PROCESSING_MESSAGES.len();
        PROCESSING_MESSAGES[index]
    }

    pub fn ticker(&self) -> StatusTicker {
        StatusTicker::new(self.period)
    }

    /// Drive `future` to completion, reporting each advisory message as it
    /// comes due.
    pub async fn while_processing<F: Future>(
        &self,
        future: F,
        mut on_message: impl FnMut(&'static str),
    ) -> F::Output {
        let mut ticker = self.ticker();
        tokio::pin!(future);
        loop {
            tokio::select! {
                output = &mut future => return output,
                message = ticker.tick() => on_message(message),
            }
        }
    }
}

/// Yields the next advisory message each period, starting immediately with
/// the first one.
pub struct StatusTicker {
    interval: Interval,
    next: usize,
}

impl StatusTicker {
    fn new(period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, next: 0 }
    }

    pub async fn tick(&mut self) -> &'static str {
        self.interval.tick().await;
        let message = PROCESSING_MESSAGES[self.next % PROCESSING_MESSAGES.len()];
        self.next += 1;
        message
    }
}
