// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::UnixStream,
    time::{Duration, timeout},
};

const IO_TIMEOUT: Duration = Duration::from_secs(2);

/// Send one command line to the daemon.
///
/// `ERROR:` replies come back as `Err` with the prefix stripped, so callers only
/// see the daemon's reply text on success.
pub async fn send_raw(cmd: &str) -> Result<String, String> {
    send_raw_to(&crate::ipc::socket_path(), cmd).await
}

pub async fn send_raw_to(path: &Path, cmd: &str) -> Result<String, String> {
    if !path.exists() {
        return Err("daemon not running".to_string());
    }

    let mut stream = bounded("connecting to daemon", UnixStream::connect(path)).await?;

    bounded("writing request", stream.write_all(cmd.as_bytes())).await?;
    // Half-close so the server sees EOF and answers.
    bounded("finalizing request", stream.shutdown()).await?;

    let mut resp = Vec::new();
    bounded("reading reply", stream.read_to_end(&mut resp)).await?;

    into_reply(&String::from_utf8_lossy(&resp))
}

async fn bounded<T, F>(what: &str, fut: F) -> Result<T, String>
where
    F: Future<Output = std::io::Result<T>>,
{
    match timeout(IO_TIMEOUT, fut).await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(format!("{what} failed: {e}")),
        Err(_) => Err(format!("timeout {what}")),
    }
}

fn into_reply(raw: &str) -> Result<String, String> {
    let out = raw.trim_end();
    match out.strip_prefix("ERROR:") {
        Some(err) => Err(err.trim().to_string()),
        None => Ok(out.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::into_reply;

    #[test]
    fn error_lines_become_errors() {
        assert_eq!(into_reply("Stopwatch started\n"), Ok("Stopwatch started".to_string()));
        assert_eq!(into_reply("ERROR: nothing to reset"), Err("nothing to reset".to_string()));
        assert_eq!(into_reply(""), Ok(String::new()));
    }
}
