// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

// ---------------- single-instance lock ----------------

fn lock_path() -> PathBuf {
    crate::ipc::runtime_dir().join("timekeep").join("timekeep.lock")
}

pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    acquire_lock_at(&lock_path())
}

/// Holding the returned listener holds the lock; a stale socket file is reclaimed.
pub fn acquire_lock_at(path: &Path) -> Result<UnixListener, String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            match UnixStream::connect(path) {
                Ok(_) => Err(format!(
                    "timekeep is already running (another instance holds {})",
                    path.display()
                )),
                Err(_) => {
                    let _ = std::fs::remove_file(path);
                    UnixListener::bind(path)
                        .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
                }
            }
        }
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_instance_is_refused_until_first_releases() {
        let dir = std::env::temp_dir().join(format!("timekeep-lock-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("timekeep.lock");

        let first = acquire_lock_at(&path).unwrap();
        let err = acquire_lock_at(&path).unwrap_err();
        assert!(err.contains("already running"));

        // Dropping the listener leaves a stale file behind; it must be reclaimable.
        drop(first);
        assert!(acquire_lock_at(&path).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
