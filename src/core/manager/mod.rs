// Author: Dustin Pilgrim
// License: MIT

mod engine;
mod info;

use crate::core::config::Config;

/// Clock/stopwatch engine.
///
/// Pure: it never touches the real clock or spawns tasks. Every input arrives as an
/// [`Event`](crate::core::events::Event) carrying its own timestamp, and every side
/// effect leaves as an [`Action`](crate::core::action::Action) for the daemon to run.
#[derive(Debug, Clone)]
pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    pub fn replace_config(&mut self, cfg: Config) {
        self.cfg = cfg;
    }
}
