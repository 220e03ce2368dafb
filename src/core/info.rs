// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::activity::ActivityRecord;

/// Snapshot returned from the daemon for `timekeep time`.
///
/// - the struct itself is the stable JSON contract
/// - `pretty_text` is CLI-facing output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoSnapshot {
    pub current_time: String,
    pub elapsed_display: String,
    pub elapsed_seconds: u64,
    pub running: bool,
    pub can_reset: bool,
    pub sessions_logged: usize,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}

/// Snapshot returned from the daemon for `timekeep log`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSnapshot {
    pub entries: Vec<ActivityRecord>,
    pub total_seconds: u64,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}

impl LogSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl InfoSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
