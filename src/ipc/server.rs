// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{Duration, timeout},
};

use crate::core::manager_msg::ManagerMsg;

use super::router::route_command;

const MAX_REQUEST_BYTES: u64 = 4096;

/// Binds the daemon socket and spawns the accept loop.
pub async fn spawn_ipc_server(tx: mpsc::Sender<ManagerMsg>) -> Result<(), String> {
    let path = super::socket_path();
    let listener = bind(&path)?;

    tracing::info!("ipc: listening on {}", path.display());
    tokio::spawn(accept_loop(listener, tx));
    Ok(())
}

pub fn bind(path: &Path) -> Result<UnixListener, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    // Single-instance is enforced elsewhere; anything left here is stale.
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }

    UnixListener::bind(path).map_err(|e| format!("failed to bind {}: {e}", path.display()))
}

pub async fn accept_loop(listener: UnixListener, tx: mpsc::Sender<ManagerMsg>) {
    loop {
        match listener.accept().await {
            Ok((mut stream, _addr)) => {
                let tx = tx.clone();

                tokio::spawn(async move {
                    let result = timeout(Duration::from_secs(10), async {
                        if let Err(e) = handle_connection(&mut stream, &tx).await {
                            tracing::error!("error handling IPC connection: {}", e);
                        }
                    })
                    .await;

                    if result.is_err() {
                        tracing::error!("IPC connection timed out after 10 seconds");
                    }

                    let _ = stream.shutdown().await;
                });
            }
            Err(e) => tracing::error!("failed to accept IPC connection: {}", e),
        }

        if tx.is_closed() {
            tracing::info!("ipc: daemon gone, closing listener");
            break;
        }
    }
}

async fn handle_connection(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<ManagerMsg>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut limited = (&mut *stream).take(MAX_REQUEST_BYTES);
    limited.read_to_end(&mut buf).await?;

    if buf.is_empty() {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf).trim().to_string();

    if !cmd.contains("--json") {
        tracing::debug!("received IPC command: {}", cmd);
    }

    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::Event;
    use crate::ipc::client::send_raw_to;

    fn temp_socket(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("timekeep-test-{}-{name}", std::process::id()))
            .join("timekeep.sock")
    }

    #[tokio::test]
    async fn round_trip_over_socket() {
        let path = temp_socket("roundtrip");
        let listener = bind(&path).unwrap();
        let (tx, mut rx) = mpsc::channel(4);

        tokio::spawn(accept_loop(listener, tx));
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let ManagerMsg::Control { event, reply } = msg {
                    assert!(matches!(event, Event::StartPause { .. }));
                    let _ = reply.send(Ok("Stopwatch started".to_string()));
                }
            }
        });

        let out = send_raw_to(&path, "toggle").await.unwrap();
        assert_eq!(out, "Stopwatch started");

        let err = send_raw_to(&path, "bogus").await.unwrap_err();
        assert_eq!(err, "Unknown command 'bogus'");

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn missing_socket_means_not_running() {
        let path = temp_socket("missing");
        let err = send_raw_to(&path, "time").await.unwrap_err();
        assert_eq!(err, "daemon not running");
    }
}
