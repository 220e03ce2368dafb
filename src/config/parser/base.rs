// Author: Dustin Pilgrim
// License: MIT

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;

use crate::core::config::{
    Config, DEFAULT_CLOCK_FORMAT, DEFAULT_SESSION_DESCRIPTION, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TIMESTAMP_FORMAT, MIN_TICK_INTERVAL_MS,
};

pub fn parse_str(text: &str) -> Result<Config> {
    let config = RuneConfig::from_str(text).wrap_err("failed to parse config")?;
    Ok(parse_timekeep_config(&config))
}

/// Reads the `timekeep:` block. Missing keys take their defaults.
fn parse_timekeep_config(config: &RuneConfig) -> Config {
    let tick_interval_ms = config
        .get::<u64>("timekeep.tick_interval_ms")
        .or_else(|_| config.get::<u64>("timekeep.tick-interval-ms"))
        .unwrap_or(DEFAULT_TICK_INTERVAL_MS);

    if tick_interval_ms < MIN_TICK_INTERVAL_MS {
        tracing::warn!(
            "tick_interval_ms {} is below {}; clamping",
            tick_interval_ms,
            MIN_TICK_INTERVAL_MS
        );
    }
    let tick_interval_ms = tick_interval_ms.max(MIN_TICK_INTERVAL_MS);

    let clock_format = non_empty(
        config
            .get::<String>("timekeep.clock_format")
            .or_else(|_| config.get::<String>("timekeep.clock-format"))
            .ok(),
    )
    .unwrap_or_else(|| DEFAULT_CLOCK_FORMAT.to_string());

    let timestamp_format = non_empty(
        config
            .get::<String>("timekeep.timestamp_format")
            .or_else(|_| config.get::<String>("timekeep.timestamp-format"))
            .ok(),
    )
    .unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string());

    let session_description = non_empty(
        config
            .get::<String>("timekeep.session_description")
            .or_else(|_| config.get::<String>("timekeep.session-description"))
            .ok(),
    )
    .unwrap_or_else(|| DEFAULT_SESSION_DESCRIPTION.to_string());

    let notify_on_log = config
        .get::<bool>("timekeep.notify_on_log")
        .or_else(|_| config.get::<bool>("timekeep.notify-on-log"))
        .unwrap_or(true);

    let notify_command = non_empty(
        config
            .get::<String>("timekeep.notify_command")
            .or_else(|_| config.get::<String>("timekeep.notify-command"))
            .ok(),
    );

    Config {
        tick_interval_ms,
        clock_format,
        timestamp_format,
        session_description,
        notify_on_log,
        notify_command,
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_default_matches_builtin_defaults() {
        let cfg = parse_str(crate::config::DEFAULT_CONFIG_TEXT).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let text = r#"
timekeep:
  tick_interval_ms 500
  session_description "Deep Work"
  notify_on_log false
  notify_command "notify-send '{title}' '{message}'"
end
"#;
        let cfg = parse_str(text).unwrap();

        assert_eq!(cfg.tick_interval_ms, 500);
        assert_eq!(cfg.session_description, "Deep Work");
        assert!(!cfg.notify_on_log);
        assert_eq!(cfg.notify_command.as_deref(), Some("notify-send '{title}' '{message}'"));
        assert_eq!(cfg.clock_format, DEFAULT_CLOCK_FORMAT);
    }

    #[test]
    fn clamps_tiny_tick_interval() {
        let text = "timekeep:\n  tick_interval_ms 1\nend\n";
        let cfg = parse_str(text).unwrap();
        assert_eq!(cfg.tick_interval_ms, MIN_TICK_INTERVAL_MS);
    }
}
