// Author: Dustin Pilgrim
// License: MIT

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One completed stopwatch session.
///
/// Created exactly once, when a running stopwatch is paused with a nonzero
/// elapsed time. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: u64,
    pub description: String,
    pub duration_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(id: u64, description: impl Into<String>, duration_seconds: u64, now_ms: u64) -> Self {
        Self {
            id,
            description: description.into(),
            duration_seconds,
            timestamp: timestamp_from_ms(now_ms),
        }
    }
}

fn timestamp_from_ms(now_ms: u64) -> DateTime<Utc> {
    let ms = i64::try_from(now_ms).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// In-memory log of completed sessions, newest first.
///
/// Owned by the daemon for the lifetime of the process; nothing is persisted.
#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityRecord>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head. Existing entries keep their relative order.
    pub fn append(&mut self, record: ActivityRecord) {
        self.entries.push_front(record);
    }

    /// Read-only view, most recent append first.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &ActivityRecord> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ActivityRecord> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_seconds(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.duration_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, secs: u64) -> ActivityRecord {
        ActivityRecord::new(id, "Timed Session", secs, 1_700_000_000_000 + id)
    }

    #[test]
    fn append_puts_newest_first() {
        let mut log = ActivityLog::new();
        let (r1, r2, r3) = (record(1, 3), record(2, 2), record(3, 9));

        log.append(r1.clone());
        log.append(r2.clone());
        log.append(r3.clone());

        let listed: Vec<ActivityRecord> = log.list().cloned().collect();
        assert_eq!(listed, vec![r3, r2, r1]);
    }

    #[test]
    fn latest_tracks_last_append() {
        let mut log = ActivityLog::new();
        assert!(log.latest().is_none());
        assert!(log.is_empty());

        log.append(record(1, 5));
        assert_eq!(log.latest().map(|r| r.duration_seconds), Some(5));

        log.append(record(2, 7));
        assert_eq!(log.latest().map(|r| r.id), Some(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.total_seconds(), 12);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let r = ActivityRecord::new(42, "Timed Session", 65, 0);
        let v = serde_json::to_value(&r).unwrap();

        assert_eq!(v["id"], 42);
        assert_eq!(v["durationSeconds"], 65);
        assert_eq!(v["description"], "Timed Session");
        assert_eq!(v["timestamp"], "1970-01-01T00:00:00Z");
    }
}
