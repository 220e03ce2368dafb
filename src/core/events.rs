// Author: Dustin Pilgrim
// License: MIT

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Wall-clock refresh from the always-on clock ticker.
    ClockTick {
        now_ms: u64,
    },

    /// One second of stopwatch time. Only delivered while the stopwatch ticker is armed.
    StopwatchTick {
        now_ms: u64,
    },

    Start {
        now_ms: u64,
    },
    Pause {
        now_ms: u64,
    },

    /// Combined start/pause button: starts when idle, pauses (and logs) when running.
    StartPause {
        now_ms: u64,
    },

    Reset {
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::ClockTick { now_ms }
            | Event::StopwatchTick { now_ms }
            | Event::Start { now_ms }
            | Event::Pause { now_ms }
            | Event::StartPause { now_ms }
            | Event::Reset { now_ms } => *now_ms,
        }
    }

    /// Tick events are high frequency and are not logged individually.
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::ClockTick { .. } | Event::StopwatchTick { .. })
    }
}
