// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{
    events::Event,
    info::{InfoSnapshot, LogSnapshot},
};

#[derive(Debug)]
pub enum ManagerMsg {
    /// Fire-and-forget event (tickers).
    Event(Event),

    /// User-triggered event; the reply carries a human-readable outcome.
    Control {
        event: Event,
        reply: oneshot::Sender<Result<String, String>>,
    },

    GetInfo { reply: oneshot::Sender<InfoSnapshot> },

    GetLog { reply: oneshot::Sender<LogSnapshot> },

    GetSettings { reply: oneshot::Sender<String> },

    ReloadConfig {
        reply: oneshot::Sender<Result<String, String>>,
    },

    StopDaemon {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
