// Author: Dustin Pilgrim
// License: MIT

/// Transient stopwatch state.
///
/// `Idle` is `running == false` (elapsed may still be > 0 from a previous run),
/// `Running` is `running == true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    running: bool,
    elapsed_seconds: u64,

    // Latest wall-clock sample (ms since epoch), refreshed by every event.
    wall_clock_ms: u64,

    // Last issued record id; ids are time based but strictly increasing.
    last_record_id: u64,
}

impl State {
    pub fn new(now_ms: u64) -> Self {
        Self {
            running: false,
            elapsed_seconds: 0,
            wall_clock_ms: now_ms,
            last_record_id: 0,
        }
    }

    // ---------------- stopwatch ----------------

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn start_running(&mut self) {
        self.running = true;
    }

    pub fn stop_running(&mut self) {
        self.running = false;
    }

    pub fn add_second(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    pub fn clear_elapsed(&mut self) {
        self.elapsed_seconds = 0;
    }

    /// Reset is only meaningful when something is running or on the display.
    pub fn can_reset(&self) -> bool {
        self.running || self.elapsed_seconds > 0
    }

    // ---------------- wall clock ----------------

    pub fn wall_clock_ms(&self) -> u64 {
        self.wall_clock_ms
    }

    pub fn set_wall_clock_ms(&mut self, now_ms: u64) {
        self.wall_clock_ms = now_ms;
    }

    // ---------------- record ids ----------------

    pub fn next_record_id(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last_record_id.saturating_add(1));
        self.last_record_id = id;
        id
    }
}
