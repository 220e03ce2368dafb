// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use crate::core::config::Config;

const LABELS: [&str; 7] = [
    "Config File",
    "TickIntervalMs",
    "ClockFormat",
    "TimestampFormat",
    "SessionDescription",
    "NotifyOnLog",
    "NotifyCommand",
];

/// Settings view: the effective configuration, one aligned row per key.
pub fn render_settings(cfg: &Config, path: Option<&Path>) -> String {
    let width = LABELS.iter().map(|s| s.len()).max().unwrap_or(0);

    let file = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    let values = [
        file,
        cfg.tick_interval_ms.to_string(),
        cfg.clock_format.clone(),
        cfg.timestamp_format.clone(),
        cfg.session_description.clone(),
        cfg.notify_on_log.to_string(),
        cfg.notify_command.clone().unwrap_or_else(|| "-".to_string()),
    ];

    let mut out = String::from("◆ SETTINGS\n");
    for (label, value) in LABELS.iter().zip(values.iter()) {
        out.push_str(&format!("  {:<width$} │ {}\n", label, value, width = width));
    }

    out.trim_end().to_string()
}
