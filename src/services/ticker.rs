// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::core::clock::Clock;
use crate::core::manager_msg::ManagerMsg;

/// Handle to a running periodic task.
///
/// The task is aborted on [`cancel`](Self::cancel) and on drop, so whoever owns the
/// handle owns the ticker: no callback can outlive it.
#[derive(Debug)]
pub struct PeriodicTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(ticker = self.name, "ticker cancelled");
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Send `make_msg(now_ms)` every `period` until the receiver is gone or the task is cancelled.
///
/// The first message is sent one full period after spawning.
pub fn spawn_periodic<F>(
    name: &'static str,
    period: Duration,
    clock: Arc<dyn Clock>,
    tx: Sender<ManagerMsg>,
    make_msg: F,
) -> PeriodicTask
where
    F: Fn(u64) -> ManagerMsg + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // interval() completes its first tick immediately.
        ticks.tick().await;

        tracing::debug!(ticker = name, period_ms = period.as_millis() as u64, "ticker started");

        loop {
            ticks.tick().await;

            if tx.send(make_msg(clock.now_ms())).await.is_err() {
                tracing::warn!(ticker = name, "ticker stopping (receiver dropped)");
                break;
            }
        }
    });

    PeriodicTask {
        name,
        handle: Some(handle),
    }
}
