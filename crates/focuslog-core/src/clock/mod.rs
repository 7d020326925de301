//! Session clock: countdown and stopwatch state machines.
//!
//! Neither machine owns a thread. A [`TickScheduler`] hands out [`Tick`]s
//! while the active machine is running, and the caller feeds them back
//! together with the current wall-clock time.
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle
//!            \-> Finished -> Idle     (countdown, await-stop policy)
//! ```

mod countdown;
mod session_clock;
mod stopwatch;
mod ticker;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use countdown::{Countdown, DEFAULT_PERTURB_BOUND_MIN, PERTURB_HARD_CAP_MIN};
pub use session_clock::{CompletionPolicy, SessionClock, StopOutcome};
pub use stopwatch::Stopwatch;
pub use ticker::{Tick, TickScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    #[default]
    Idle,
    Running,
    Paused,
    /// Countdown reached zero and is waiting for an explicit stop.
    Finished,
}

/// Which of the two machines is in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Countdown,
    Stopwatch,
}

impl ClockState {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockState::Idle => "idle",
            ClockState::Running => "running",
            ClockState::Paused => "paused",
            ClockState::Finished => "finished",
        }
    }
}

impl ClockMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockMode::Countdown => "countdown",
            ClockMode::Stopwatch => "stopwatch",
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "idle" => Ok(ClockState::Idle),
            "running" => Ok(ClockState::Running),
            "paused" => Ok(ClockState::Paused),
            "finished" => Ok(ClockState::Finished),
            other => Err(format!("unknown clock state: {other}")),
        }
    }
}

impl FromStr for ClockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "countdown" | "timer" => Ok(ClockMode::Countdown),
            "stopwatch" => Ok(ClockMode::Stopwatch),
            other => Err(format!("unknown clock mode: {other}")),
        }
    }
}
