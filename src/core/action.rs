// Author: Dustin Pilgrim
// License: MIT

use crate::core::activity::ActivityRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Begin the 1-second stopwatch ticker.
    ArmStopwatch,

    /// Cancel the stopwatch ticker if one is armed.
    DisarmStopwatch,

    /// Hand a completed session to the activity log.
    AppendActivity(ActivityRecord),

    /// Tell the user something happened (runtime decides how: notify command or log line).
    Notify {
        title: String,
        message: String,
    },
}
