// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::{events::Event, manager_msg::ManagerMsg, utils::now_ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Toggle,
    Start,
    Pause,
    Reset,
    Time { json: bool },
    Log { json: bool },
    Settings,
    Reload,
    Stop,
}

pub fn parse_request(line: &str) -> Result<Request, String> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");
    let json = parts.any(|p| p == "--json");

    match head {
        "toggle" | "start-pause" => Ok(Request::Toggle),
        "start" => Ok(Request::Start),
        "pause" => Ok(Request::Pause),
        "reset" => Ok(Request::Reset),
        "time" | "info" => Ok(Request::Time { json }),
        "log" => Ok(Request::Log { json }),
        "settings" => Ok(Request::Settings),
        "reload" => Ok(Request::Reload),
        "stop" => Ok(Request::Stop),
        _ => Err(format!("ERROR: Unknown command '{}'", line.trim())),
    }
}

/// Routes one command line to the daemon loop and renders the reply.
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<ManagerMsg>) -> String {
    let request = match parse_request(cmd) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("unknown IPC command: {}", cmd.trim());
            return e;
        }
    };

    let result = match request {
        Request::Toggle => control(tx, Event::StartPause { now_ms: now_ms() }).await,
        Request::Start => control(tx, Event::Start { now_ms: now_ms() }).await,
        Request::Pause => control(tx, Event::Pause { now_ms: now_ms() }).await,
        Request::Reset => control(tx, Event::Reset { now_ms: now_ms() }).await,

        Request::Time { json } => ask(tx, |reply| ManagerMsg::GetInfo { reply })
            .await
            .map(|snap| if json { snap.to_json() } else { snap.pretty_text }),

        Request::Log { json } => ask(tx, |reply| ManagerMsg::GetLog { reply })
            .await
            .map(|snap| if json { snap.to_json() } else { snap.pretty_text }),

        Request::Settings => ask(tx, |reply| ManagerMsg::GetSettings { reply }).await,

        Request::Reload => ask(tx, |reply| ManagerMsg::ReloadConfig { reply })
            .await
            .and_then(|r| r),

        Request::Stop => ask(tx, |reply| ManagerMsg::StopDaemon { reply })
            .await
            .and_then(|r| r),
    };

    result.unwrap_or_else(|e| format!("ERROR: {e}"))
}

async fn control(tx: &mpsc::Sender<ManagerMsg>, event: Event) -> Result<String, String> {
    ask(tx, |reply| ManagerMsg::Control { event, reply })
        .await
        .and_then(|r| r)
}

async fn ask<T, F>(tx: &mpsc::Sender<ManagerMsg>, make: F) -> Result<T, String>
where
    F: FnOnce(oneshot::Sender<T>) -> ManagerMsg,
{
    let (reply, rx) = oneshot::channel();

    tx.send(make(reply))
        .await
        .map_err(|_| "daemon is shutting down".to_string())?;

    rx.await.map_err(|_| "daemon dropped the request".to_string())
}
