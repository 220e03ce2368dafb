// Author: Dustin Pilgrim
// License: MIT

use crate::cli::Command;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(cmd: Command) -> Result<(), AnyError> {
    let Some(line) = cmd.ipc_line() else {
        println!("{}", about_text());
        return Ok(());
    };

    match crate::ipc::client::send_raw(&line).await {
        Ok(out) => {
            if !out.is_empty() {
                println!("{out}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("timekeep: {e}");
            std::process::exit(1);
        }
    }
}

pub fn about_text() -> String {
    format!(
        "{} {}\n{}\nLicense: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_LICENSE"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_mentions_name_and_version() {
        let text = about_text();
        assert!(text.starts_with(&format!("timekeep {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("License: MIT"));
    }
}
