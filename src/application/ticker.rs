use crate::error::{AppError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// One firing of a [`StreamTicker`]. `index` starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub index: u64,
}

/// Invokes a callback at a fixed interval until stopped.
///
/// The first tick fires one interval after the ticker is spawned. Without
/// [`StreamTicker::max_ticks`] the ticker runs until its stop signal is sent.
#[derive(Debug, Clone)]
pub struct StreamTicker {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl StreamTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    /// Stop on its own after `max_ticks` completed callbacks.
    pub fn max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Spawn the ticker as a background task.
    ///
    /// A callback error stops the ticker; [`TickerHandle::join`] returns it.
    /// Dropping the handle stops the ticker once no [`TickerStopper`] is left.
    pub fn spawn<F, Fut>(self, mut on_tick: F) -> TickerHandle
    where
        F: FnMut(Tick) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let period = self.interval.max(Duration::from_millis(1));
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                interval_ms = period.as_millis() as u64,
                max_ticks = ?self.max_ticks,
                "Stream ticker started"
            );

            let mut completed = 0u64;
            loop {
                if self.max_ticks.is_some_and(|max| completed >= max) {
                    break;
                }

                tokio::select! {
                    biased;
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        let tick = Tick { index: completed + 1 };
                        if let Err(e) = on_tick(tick).await {
                            warn!(tick = tick.index, error = %e, "Stream ticker stopped by callback error");
                            return Err(e);
                        }
                        completed += 1;
                    }
                }
            }

            info!(ticks = completed, "Stream ticker stopped");
            Ok(completed)
        });

        TickerHandle {
            cancel: Arc::new(cancel_tx),
            task,
        }
    }
}

/// Controls a running [`StreamTicker`].
pub struct TickerHandle {
    cancel: Arc<watch::Sender<bool>>,
    task: JoinHandle<Result<u64>>,
}

impl TickerHandle {
    /// Signal the ticker to stop. A callback already running completes.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }

    /// A detached stop signal, for use from another task.
    pub fn stopper(&self) -> TickerStopper {
        TickerStopper {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Wait for the ticker to finish; returns the number of completed ticks.
    pub async fn join(self) -> Result<u64> {
        let TickerHandle { cancel, task } = self;
        let result = task
            .await
            .map_err(|e| AppError::TickerError(e.to_string()));
        drop(cancel);
        result?
    }
}

/// Cloneable stop signal for a [`TickerHandle`].
#[derive(Clone)]
pub struct TickerStopper {
    cancel: Arc<watch::Sender<bool>>,
}

impl TickerStopper {
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }
}
