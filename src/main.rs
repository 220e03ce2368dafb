// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;
mod config;
mod core;
mod daemon;
mod ipc;
mod services;
mod timekeep_log;

use clap::Parser;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    let args = cli::Args::parse();

    if let Some(cmd) = args.command.clone() {
        return app::command::run(cmd).await;
    }

    app::daemon_mode::run(args).await
}
