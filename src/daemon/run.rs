// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::Event,
    manager_msg::ManagerMsg,
    utils::format_hms,
};
use crate::services::ticker::spawn_periodic;

use tokio::sync::{mpsc, watch};

use super::{AnyError, Daemon};

impl Daemon {
    pub async fn run(
        &mut self,
        shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        tracing::info!("daemon starting");

        let (tx, rx) = mpsc::channel::<ManagerMsg>(256);

        if let Err(e) = crate::ipc::server::spawn_ipc_server(tx.clone()).await {
            tracing::warn!("ipc: failed to start: {}", e);
        }

        self.serve(tx, rx, shutdown, shutdown_tx).await
    }

    /// Message loop. Returns on shutdown, on `StopDaemon`, or when every sender is gone.
    pub async fn serve(
        &mut self,
        tx: mpsc::Sender<ManagerMsg>,
        mut rx: mpsc::Receiver<ManagerMsg>,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        self.arm_clock_ticker(&tx);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("daemon stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        tracing::info!("daemon stopping (event channel closed)");
                        break;
                    };

                    match msg {
                        ManagerMsg::StopDaemon { reply } => {
                            tracing::info!("daemon stopping (stop requested via IPC)");
                            let _ = reply.send(Ok("Stopping timekeep...".to_string()));
                            let _ = shutdown_tx.send(true);
                            break;
                        }
                        other => self.handle_msg(other, &tx).await,
                    }
                }
            }
        }

        self.release_tickers();
        Ok(())
    }

    async fn handle_msg(&mut self, msg: ManagerMsg, tx: &mpsc::Sender<ManagerMsg>) {
        match msg {
            ManagerMsg::Event(event) => {
                if !event.is_tick() {
                    tracing::debug!("event: {:?}", event);
                }
                if let Err(e) = self.apply_event(event, tx).await {
                    tracing::warn!("event {:?} rejected: {}", event, e);
                }
            }

            ManagerMsg::Control { event, reply } => {
                tracing::debug!("control: {:?}", event);
                let out = self.apply_event(event, tx).await;
                let _ = reply.send(out);
            }

            ManagerMsg::GetInfo { reply } => {
                // Sample the clock now so the view is never a tick behind.
                self.state.set_wall_clock_ms(self.clock.now_ms());
                let _ = reply.send(self.manager.info_snapshot(&self.state, &self.log));
            }

            ManagerMsg::GetLog { reply } => {
                let _ = reply.send(self.manager.log_snapshot(&self.log));
            }

            ManagerMsg::GetSettings { reply } => {
                let text = crate::config::info::render_settings(
                    self.manager.cfg(),
                    self.config_path.as_deref(),
                );
                let _ = reply.send(text);
            }

            ManagerMsg::ReloadConfig { reply } => {
                let out = self.reload_config(tx);
                let _ = reply.send(out);
            }

            // serve() intercepts this before dispatch.
            ManagerMsg::StopDaemon { reply } => {
                let _ = reply.send(Err("daemon is already stopping".to_string()));
            }
        }
    }

    /// Run one event through the engine and execute its actions.
    async fn apply_event(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<ManagerMsg>,
    ) -> Result<String, String> {
        let actions = self
            .manager
            .handle_event(&mut self.state, event)
            .map_err(|e| e.to_string())?;

        let summary = describe_outcome(&event, &actions);

        for action in actions {
            if let Err(e) = self.exec_action_with_tx(action, tx).await {
                tracing::error!("action failed: {}", e);
            }
        }

        Ok(summary)
    }

    fn arm_clock_ticker(&mut self, tx: &mpsc::Sender<ManagerMsg>) {
        self.clock_ticker = Some(spawn_periodic(
            "clock",
            self.manager.cfg().tick_interval(),
            self.clock.clone(),
            tx.clone(),
            |now_ms| ManagerMsg::Event(Event::ClockTick { now_ms }),
        ));
    }

    fn reload_config(&mut self, tx: &mpsc::Sender<ManagerMsg>) -> Result<String, String> {
        let Some(path) = self.config_path.clone() else {
            return Err("no config file in use (running on built-in defaults)".to_string());
        };

        let loaded = crate::config::load_from_path(&path).map_err(|e| format!("{e:#}"))?;

        let interval_changed = loaded.cfg.tick_interval() != self.manager.cfg().tick_interval();
        self.manager.replace_config(loaded.cfg);

        // The stopwatch ticker is left alone so a running session keeps its partial second.
        if interval_changed {
            self.arm_clock_ticker(tx);
        }

        tracing::info!("config reloaded from {}", path.display());
        Ok(format!("Configuration reloaded from {}", path.display()))
    }
}

fn describe_outcome(event: &Event, actions: &[Action]) -> String {
    if matches!(event, Event::Reset { .. }) {
        return "Stopwatch reset".to_string();
    }

    if actions.iter().any(|a| matches!(a, Action::ArmStopwatch)) {
        return "Stopwatch started".to_string();
    }

    let logged = actions.iter().find_map(|a| match a {
        Action::AppendActivity(r) => Some(r.duration_seconds),
        _ => None,
    });

    match logged {
        Some(secs) => format!("Stopwatch paused (session logged: {})", format_hms(secs)),
        None if actions.iter().any(|a| matches!(a, Action::DisarmStopwatch)) => {
            "Stopwatch paused".to_string()
        }
        None => "OK".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, ManualClock};
    use crate::core::config::{Config, ConfigFile, ConfigSource};
    use crate::core::info::LogSnapshot;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::oneshot;
    use tokio::time::Duration;

    struct Running {
        tx: mpsc::Sender<ManagerMsg>,
        shutdown_tx: watch::Sender<bool>,
        task: tokio::task::JoinHandle<Result<(), AnyError>>,
    }

    fn spawn_daemon() -> Running {
        spawn_daemon_with(Config::default(), None)
    }

    fn spawn_daemon_with(cfg: Config, config_path: Option<PathBuf>) -> Running {
        let source = match &config_path {
            Some(p) => ConfigSource::File(p.clone()),
            None => ConfigSource::BuiltinDefaults,
        };
        let cfg_file = ConfigFile {
            cfg: Config {
                notify_on_log: false,
                ..cfg
            },
            source,
        };
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(1_700_000_000_000));
        let mut daemon = Daemon::new(cfg_file, config_path, clock);

        let (tx, rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn({
            let tx = tx.clone();
            let shutdown_tx = shutdown_tx.clone();
            async move { daemon.serve(tx, rx, shutdown_rx, shutdown_tx).await }
        });

        Running { tx, shutdown_tx, task }
    }

    async fn control(tx: &mpsc::Sender<ManagerMsg>, event: Event) -> Result<String, String> {
        let (reply, rx) = oneshot::channel();
        tx.send(ManagerMsg::Control { event, reply }).await.unwrap();
        rx.await.unwrap()
    }

    async fn log(tx: &mpsc::Sender<ManagerMsg>) -> LogSnapshot {
        let (reply, rx) = oneshot::channel();
        tx.send(ManagerMsg::GetLog { reply }).await.unwrap();
        rx.await.unwrap()
    }

    fn durations(snap: &LogSnapshot) -> Vec<u64> {
        snap.entries.iter().map(|r| r.duration_seconds).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_are_timed_by_the_stopwatch_ticker() {
        let d = spawn_daemon();

        assert_eq!(control(&d.tx, Event::Start { now_ms: 0 }).await.unwrap(), "Stopwatch started");
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(
            control(&d.tx, Event::Pause { now_ms: 0 }).await.unwrap(),
            "Stopwatch paused (session logged: 00:00:03)"
        );

        // Paused: further time does not count.
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(control(&d.tx, Event::Reset { now_ms: 0 }).await.unwrap(), "Stopwatch reset");
        control(&d.tx, Event::StartPause { now_ms: 0 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        control(&d.tx, Event::StartPause { now_ms: 0 }).await.unwrap();

        assert_eq!(durations(&log(&d.tx).await), vec![2, 3]);

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn fast_clock_interval_does_not_speed_up_stopwatch() {
        let d = spawn_daemon_with(
            Config {
                tick_interval_ms: 500,
                ..Config::default()
            },
            None,
        );

        control(&d.tx, Event::Start { now_ms: 0 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3200)).await;

        assert_eq!(
            control(&d.tx, Event::Pause { now_ms: 0 }).await.unwrap(),
            "Stopwatch paused (session logged: 00:00:03)"
        );
        assert_eq!(durations(&log(&d.tx).await), vec![3]);

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn reload_mid_run_keeps_stopwatch_on_real_seconds() {
        let dir = std::env::temp_dir().join(format!("timekeep-reload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("timekeep.rune");
        std::fs::write(&path, "timekeep:\n  tick_interval_ms 250\nend\n").unwrap();

        let d = spawn_daemon_with(
            Config {
                tick_interval_ms: 700,
                ..Config::default()
            },
            Some(path.clone()),
        );

        control(&d.tx, Event::Start { now_ms: 0 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let (reply, rx) = oneshot::channel();
        d.tx.send(ManagerMsg::ReloadConfig { reply }).await.unwrap();
        assert!(rx.await.unwrap().is_ok());

        // 1.5 s before the reload plus 1.7 s after.
        tokio::time::sleep(Duration::from_millis(1700)).await;
        control(&d.tx, Event::Pause { now_ms: 0 }).await.unwrap();

        assert_eq!(durations(&log(&d.tx).await), vec![3]);

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_controls_report_errors() {
        let d = spawn_daemon();

        assert_eq!(
            control(&d.tx, Event::Reset { now_ms: 0 }).await,
            Err("nothing to reset".to_string())
        );
        assert_eq!(
            control(&d.tx, Event::Pause { now_ms: 0 }).await,
            Err("not running".to_string())
        );

        control(&d.tx, Event::Start { now_ms: 0 }).await.unwrap();
        assert_eq!(
            control(&d.tx, Event::Start { now_ms: 0 }).await,
            Err("already running".to_string())
        );

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn info_reports_running_stopwatch() {
        let d = spawn_daemon();

        control(&d.tx, Event::Start { now_ms: 0 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let (reply, rx) = oneshot::channel();
        d.tx.send(ManagerMsg::GetInfo { reply }).await.unwrap();
        let snap = rx.await.unwrap();

        assert!(snap.running);
        assert_eq!(snap.elapsed_seconds, 2);
        assert_eq!(snap.elapsed_display, "00:00:02");

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_message_ends_loop() {
        let d = spawn_daemon();

        let (reply, rx) = oneshot::channel();
        d.tx.send(ManagerMsg::StopDaemon { reply }).await.unwrap();

        assert_eq!(rx.await.unwrap(), Ok("Stopping timekeep...".to_string()));
        d.task.await.unwrap().unwrap();
        assert!(*d.shutdown_tx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn reload_without_config_file_is_an_error() {
        let d = spawn_daemon();

        let (reply, rx) = oneshot::channel();
        d.tx.send(ManagerMsg::ReloadConfig { reply }).await.unwrap();

        assert!(rx.await.unwrap().is_err());

        let _ = d.shutdown_tx.send(true);
        d.task.await.unwrap().unwrap();
    }

    #[test]
    fn outcome_text() {
        assert_eq!(describe_outcome(&Event::Reset { now_ms: 0 }, &[]), "Stopwatch reset");
        assert_eq!(
            describe_outcome(&Event::StartPause { now_ms: 0 }, &[Action::ArmStopwatch]),
            "Stopwatch started"
        );
        assert_eq!(
            describe_outcome(&Event::Pause { now_ms: 0 }, &[Action::DisarmStopwatch]),
            "Stopwatch paused"
        );
    }
}
