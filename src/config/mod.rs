// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::core::config::{Config, ConfigFile, ConfigSource};

pub mod bootstrap;
pub mod info;
pub mod parser;

pub const DEFAULT_CONFIG_TEXT: &str = include_str!("../../data/timekeep.rune");

/// `~/.config/timekeep/timekeep.rune` (or the platform config dir equivalent).
pub fn resolve_default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("timekeep")
        .join("timekeep.rune")
}

/// Load a config file. A missing file yields the built-in defaults.
pub fn load_from_path(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::info!("config: {} not found, using built-in defaults", path.display());
        return Ok(ConfigFile {
            cfg: Config::default(),
            source: ConfigSource::BuiltinDefaults,
        });
    }

    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;

    let cfg = parser::parse_str(&text)
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    tracing::debug!("config: loaded {}", path.display());

    Ok(ConfigFile {
        cfg,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "timekeep-missing-{}/timekeep.rune",
            std::process::id()
        ));

        let loaded = load_from_path(&path).unwrap();

        assert_eq!(loaded.cfg, Config::default());
        assert_eq!(loaded.source, ConfigSource::BuiltinDefaults);
    }

    #[test]
    fn existing_file_is_parsed() {
        let dir = std::env::temp_dir().join(format!("timekeep-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("timekeep.rune");
        std::fs::write(&path, "timekeep:\n  session_description \"Reading\"\nend\n").unwrap();

        let loaded = load_from_path(&path).unwrap();

        assert_eq!(loaded.cfg.session_description, "Reading");
        assert_eq!(loaded.source, ConfigSource::File(path.clone()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
