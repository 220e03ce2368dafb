// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;

use crate::core::{
    activity::ActivityLog,
    clock::Clock,
    config::ConfigFile,
    manager::Manager,
    state::State,
};
use crate::services::ticker::PeriodicTask;

use std::path::PathBuf;
use std::sync::Arc;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Single owner of all application state.
///
/// The activity log is only reachable through the daemon's message loop:
/// the engine appends via [`Action::AppendActivity`](crate::core::action::Action),
/// views read via snapshot messages.
pub struct Daemon {
    manager: Manager,
    state: State,
    log: ActivityLog,

    clock: Arc<dyn Clock>,
    config_path: Option<PathBuf>,

    clock_ticker: Option<PeriodicTask>,
    stopwatch_ticker: Option<PeriodicTask>,
}

impl Daemon {
    pub fn new(cfg_file: ConfigFile, config_path: Option<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let now_ms = clock.now_ms();

        tracing::debug!(
            source = %cfg_file.source,
            tick_interval_ms = cfg_file.cfg.tick_interval_ms,
            notify_on_log = cfg_file.cfg.notify_on_log,
            has_notify_command = cfg_file.cfg.notify_command.is_some(),
            "daemon: config applied"
        );

        Self {
            manager: Manager::new(cfg_file.cfg),
            state: State::new(now_ms),
            log: ActivityLog::new(),
            clock,
            config_path,
            clock_ticker: None,
            stopwatch_ticker: None,
        }
    }

    /// Release both tickers. Safe to call more than once.
    fn release_tickers(&mut self) {
        if let Some(t) = self.stopwatch_ticker.take() {
            t.cancel();
        }
        if let Some(t) = self.clock_ticker.take() {
            t.cancel();
        }
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        self.release_tickers();
    }
}
