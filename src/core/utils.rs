// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Local, Utc};

pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    d.as_millis() as u64
}

/// Render a second count as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so `90000` renders as `25:00:00`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Wall-clock sample in local time using a strftime pattern.
pub fn format_wall_clock(now_ms: u64, pattern: &str) -> String {
    let utc = utc_from_ms(now_ms);
    utc.with_timezone(&Local).format(pattern).to_string()
}

/// Record timestamp in local time using a strftime pattern.
pub fn format_timestamp(ts: &DateTime<Utc>, pattern: &str) -> String {
    ts.with_timezone(&Local).format(pattern).to_string()
}

fn utc_from_ms(ms: u64) -> DateTime<Utc> {
    let ms = i64::try_from(ms).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
