// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action, config::STOPWATCH_PERIOD, events::Event, manager_msg::ManagerMsg,
    utils::format_hms,
};
use crate::services::ticker::{PeriodicTask, spawn_periodic};

use tokio::process::Command;
use tokio::sync::mpsc;

use std::process::Stdio;

use super::{AnyError, Daemon};

impl Daemon {
    pub(super) async fn exec_action_with_tx(
        &mut self,
        action: Action,
        tx: &mpsc::Sender<ManagerMsg>,
    ) -> Result<(), AnyError> {
        match action {
            Action::ArmStopwatch => {
                if self.stopwatch_ticker.as_ref().is_some_and(PeriodicTask::is_active) {
                    tracing::warn!("stopwatch ticker already armed; replacing it");
                }
                // Replacing an armed ticker drops (and cancels) the old one.
                self.stopwatch_ticker = Some(spawn_periodic(
                    "stopwatch",
                    STOPWATCH_PERIOD,
                    self.clock.clone(),
                    tx.clone(),
                    |now_ms| ManagerMsg::Event(Event::StopwatchTick { now_ms }),
                ));
            }

            Action::DisarmStopwatch => {
                if let Some(t) = self.stopwatch_ticker.take() {
                    t.cancel();
                }
            }

            Action::AppendActivity(record) => {
                tracing::info!(
                    id = record.id,
                    duration = %format_hms(record.duration_seconds),
                    "activity logged"
                );
                self.log.append(record);
            }

            Action::Notify { title, message } => {
                self.notify(&title, &message)?;
            }
        }

        Ok(())
    }

    fn notify(&self, title: &str, message: &str) -> Result<(), AnyError> {
        let Some(template) = self.manager.cfg().notify_command.as_deref() else {
            tracing::info!("notify: {title}: {message}");
            return Ok(());
        };

        let command = template
            .replace("{title}", &escape_single_quotes(title))
            .replace("{message}", &escape_single_quotes(message));

        tracing::info!("notify: {}", command);

        // Detached: the child is reaped by tokio when it exits.
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .env("TIMEKEEP_TITLE", title)
            .env("TIMEKEEP_MESSAGE", message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(())
    }
}

/// Escape for use inside a single-quoted shell string.
fn escape_single_quotes(s: &str) -> String {
    s.replace('\'', "'\\''")
}

#[cfg(test)]
mod tests {
    use super::escape_single_quotes;

    #[test]
    fn escapes_single_quotes() {
        assert_eq!(escape_single_quotes("it's"), "it'\\''s");
        assert_eq!(escape_single_quotes("Duration: 00:00:03"), "Duration: 00:00:03");
    }
}
