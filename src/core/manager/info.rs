// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    activity::ActivityLog,
    info::{InfoSnapshot, LogSnapshot},
    state::State,
    utils::{format_hms, format_timestamp, format_wall_clock},
};

use super::Manager;

pub const EMPTY_LOG_TEXT: &str = "No activities logged yet. Start the timer!";

impl Manager {
    pub fn info_snapshot(&self, state: &State, log: &ActivityLog) -> InfoSnapshot {
        let current_time = format_wall_clock(state.wall_clock_ms(), &self.cfg.clock_format);
        let elapsed_display = format_hms(state.elapsed_seconds());

        let status = if state.running() {
            "running"
        } else if state.elapsed_seconds() > 0 {
            "paused"
        } else {
            "idle"
        };

        let mut pretty = String::new();
        pretty.push_str("◆ TIME\n");
        pretty.push_str(&format!("  Current Time │ {current_time}\n"));
        pretty.push_str(&format!("  Stopwatch    │ {elapsed_display}\n"));
        pretty.push_str(&format!("  State        │ {status}\n"));
        pretty.push_str(&format!("  Sessions     │ {}", log.len()));
        if let Some(last) = log.latest() {
            pretty.push_str(&format!(
                "\n  Last Session │ {}",
                format_hms(last.duration_seconds)
            ));
        }

        InfoSnapshot {
            current_time,
            elapsed_display,
            elapsed_seconds: state.elapsed_seconds(),
            running: state.running(),
            can_reset: state.can_reset(),
            sessions_logged: log.len(),
            pretty_text: pretty,
        }
    }

    pub fn log_snapshot(&self, log: &ActivityLog) -> LogSnapshot {
        let total_seconds = log.total_seconds();

        let pretty_text = if log.is_empty() {
            EMPTY_LOG_TEXT.to_string()
        } else {
            let mut out = String::from("◆ ACTIVITY LOG\n");
            for record in log.list() {
                out.push('\n');
                out.push_str(&format!("  {}\n", record.description));
                out.push_str(&format!("    Duration: {}\n", format_hms(record.duration_seconds)));
                out.push_str(&format!(
                    "    Logged: {}\n",
                    format_timestamp(&record.timestamp, &self.cfg.timestamp_format)
                ));
            }
            out.push('\n');
            out.push_str(&format!("  Total: {}", format_hms(total_seconds)));
            out
        };

        LogSnapshot {
            entries: log.list().cloned().collect(),
            total_seconds,
            pretty_text,
        }
    }
}
