// Author: Dustin Pilgrim
// License: MIT

use crate::core::clock::{Clock, SystemClock};
use crate::daemon::Daemon;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::Args;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("{e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    // file logging
    let log_path = crate::timekeep_log::default_log_path();
    if let Some(path) = log_path.as_deref() {
        let needs_blank =
            crate::timekeep_log::prepare_log_file(path, crate::timekeep_log::LogPolicy::default())
                .unwrap_or(false);

        if needs_blank {
            let _ = crate::timekeep_log::write_raw_line(path, "");
        }
        let _ = crate::timekeep_log::write_raw_line(path, &crate::timekeep_log::run_header());
    }

    if let Err(e) = crate::timekeep_log::init_tracing(log_path.as_deref(), args.verbose) {
        eprintln!("timekeep: failed to enable file logging: {e}");
        crate::timekeep_log::init_tracing(None, args.verbose)?;
    }

    if let Some(path) = log_path.as_deref() {
        tracing::info!("file logging enabled: {}", path.display());
    }
    if args.verbose {
        tracing::debug!("debug logging enabled");
    }

    tracing::info!("timekeep starting");

    // resolve config path
    let config_path: PathBuf = match args.config.as_deref() {
        Some(p) => p.to_path_buf(),
        None => {
            // bootstrap only if no --config (and bootstrap itself does "only if missing")
            match crate::config::bootstrap::ensure_user_config_exists() {
                Ok(true) => tracing::info!("wrote default config"),
                Ok(false) => {}
                Err(e) => tracing::warn!("failed to bootstrap default config: {e}"),
            }
            crate::config::resolve_default_config_path()
        }
    };

    let cfg_file = crate::config::load_from_path(&config_path).map_err(|e| {
        tracing::error!("{e:#}");
        e.to_string()
    })?;

    let active_path = match &cfg_file.source {
        crate::core::config::ConfigSource::File(p) => Some(p.clone()),
        crate::core::config::ConfigSource::BuiltinDefaults => None,
    };

    // shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut daemon = Daemon::new(cfg_file, active_path, clock);

    let mut daemon_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move { daemon.run(shutdown_rx, shutdown_tx).await }
    });

    let result = tokio::select! {
        res = &mut daemon_task => {
            match res {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);

            match daemon_task.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(join_err) => Err(Box::new(join_err) as AnyError),
            }
        }
    };

    let _ = std::fs::remove_file(crate::ipc::socket_path());
    tracing::info!("timekeep stopped");

    result
}
