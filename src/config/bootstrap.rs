// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::Path;

use super::DEFAULT_CONFIG_TEXT;

/// Write the shipped default config to `path` unless something is already there.
///
/// Returns `true` if a file was written.
pub fn ensure_config_exists(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, DEFAULT_CONFIG_TEXT)?;
    Ok(true)
}

pub fn ensure_user_config_exists() -> io::Result<bool> {
    ensure_config_exists(&super::resolve_default_config_path())
}
