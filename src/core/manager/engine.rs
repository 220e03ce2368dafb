// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    activity::ActivityRecord,
    error::{Error, StateError},
    events::Event,
    state::State,
    utils::format_hms,
};

use super::Manager;

pub const SESSION_LOGGED_TITLE: &str = "Session Logged";

impl Manager {
    pub fn handle_event(&mut self, state: &mut State, event: Event) -> Result<Vec<Action>, Error> {
        let now_ms = event.now_ms();
        state.set_wall_clock_ms(now_ms);

        let mut out = Vec::new();

        match event {
            Event::ClockTick { .. } => {}

            Event::StopwatchTick { .. } => {
                // A tick can race a pause through the channel; only count it while running.
                if state.running() {
                    state.add_second();
                }
            }

            Event::Start { .. } => {
                if state.running() {
                    return Err(Error::InvalidState(StateError::AlreadyRunning));
                }
                out.extend(self.start(state));
            }

            Event::Pause { .. } => {
                if !state.running() {
                    return Err(Error::InvalidState(StateError::NotRunning));
                }
                out.extend(self.pause(state, now_ms));
            }

            Event::StartPause { .. } => {
                if state.running() {
                    out.extend(self.pause(state, now_ms));
                } else {
                    out.extend(self.start(state));
                }
            }

            Event::Reset { .. } => {
                if !state.can_reset() {
                    return Err(Error::InvalidState(StateError::NothingToReset));
                }

                let was_running = state.running();
                state.stop_running();
                state.clear_elapsed();
                out.push(Action::DisarmStopwatch);

                tracing::debug!(was_running, "stopwatch reset");
            }
        }

        Ok(out)
    }

    fn start(&self, state: &mut State) -> Vec<Action> {
        state.start_running();
        tracing::debug!(elapsed = state.elapsed_seconds(), "stopwatch started");
        vec![Action::ArmStopwatch]
    }

    fn pause(&self, state: &mut State, now_ms: u64) -> Vec<Action> {
        state.stop_running();
        tracing::debug!(elapsed = state.elapsed_seconds(), "stopwatch paused");

        let mut out = vec![Action::DisarmStopwatch];

        let elapsed = state.elapsed_seconds();
        if elapsed == 0 {
            tracing::debug!("stopwatch paused with nothing elapsed; not logging");
            return out;
        }

        let id = state.next_record_id(now_ms);
        let record = ActivityRecord::new(id, self.cfg.session_description.clone(), elapsed, now_ms);

        tracing::info!(id, duration_seconds = elapsed, "session completed");
        out.push(Action::AppendActivity(record));

        if self.cfg.notify_on_log {
            out.push(Action::Notify {
                title: SESSION_LOGGED_TITLE.to_string(),
                message: format!("Duration: {}", format_hms(elapsed)),
            });
        }

        out
    }
}
