// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "timekeep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Timekeep stopwatch daemon"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(about = "Start the stopwatch if idle, pause it (and log the session) if running")]
    Toggle,

    #[command(about = "Start the stopwatch")]
    Start,

    #[command(about = "Pause the stopwatch and log the session")]
    Pause,

    #[command(about = "Stop the stopwatch and clear the elapsed time without logging")]
    Reset,

    #[command(about = "Show the current time and the stopwatch")]
    Time {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Show logged sessions, newest first")]
    Log {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Show the effective configuration")]
    Settings,

    #[command(about = "Reload the configuration without restarting timekeep")]
    Reload,

    #[command(about = "Stop the running timekeep daemon")]
    Stop,

    #[command(about = "Show version information")]
    About,
}

impl Command {
    /// Socket line for commands served by the daemon; `None` for local-only commands.
    pub fn ipc_line(&self) -> Option<String> {
        let line = match self {
            Command::Toggle => "toggle".to_string(),
            Command::Start => "start".to_string(),
            Command::Pause => "pause".to_string(),
            Command::Reset => "reset".to_string(),
            Command::Time { json } => with_json("time", *json),
            Command::Log { json } => with_json("log", *json),
            Command::Settings => "settings".to_string(),
            Command::Reload => "reload".to_string(),
            Command::Stop => "stop".to_string(),
            Command::About => return None,
        };
        Some(line)
    }
}

fn with_json(cmd: &str, json: bool) -> String {
    if json {
        format!("{cmd} --json")
    } else {
        cmd.to_string()
    }
}
