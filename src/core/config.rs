// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const DEFAULT_CLOCK_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_SESSION_DESCRIPTION: &str = "Timed Session";

/// The stopwatch advances one second per tick, so its ticker always runs at 1 Hz.
pub const STOPWATCH_PERIOD: Duration = Duration::from_secs(1);

/// Effective runtime configuration.
///
/// This is the canonical representation the manager and daemon consume.
/// The loader is responsible for defaults and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Period of the wall-clock ticker. The stopwatch always ticks at [`STOPWATCH_PERIOD`].
    pub tick_interval_ms: u64,

    /// strftime pattern for the wall clock in the time view.
    pub clock_format: String,

    /// strftime pattern for record timestamps in the log view.
    pub timestamp_format: String,

    /// Label stored on every logged session.
    pub session_description: String,

    /// Emit a "Session Logged" notification after a session is recorded.
    pub notify_on_log: bool,

    /// Shell command used for notifications. `{title}` and `{message}` are substituted.
    /// When unset, notifications go to the log.
    pub notify_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            clock_format: DEFAULT_CLOCK_FORMAT.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            session_description: DEFAULT_SESSION_DESCRIPTION.to_string(),
            notify_on_log: true,
            notify_command: None,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(MIN_TICK_INTERVAL_MS))
    }
}

/// Loaded config plus where it came from.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub cfg: Config,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(std::path::PathBuf),
    BuiltinDefaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(p) => write!(f, "{}", p.display()),
            ConfigSource::BuiltinDefaults => write!(f, "built-in defaults"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_is_clamped() {
        let mut cfg = Config::default();
        assert_eq!(cfg.tick_interval(), Duration::from_secs(1));

        cfg.tick_interval_ms = 1;
        assert_eq!(cfg.tick_interval(), Duration::from_millis(MIN_TICK_INTERVAL_MS));
        assert_eq!(STOPWATCH_PERIOD, Duration::from_secs(1));
    }
}
