use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockMode, ClockState};
use crate::session::RecordedSession;

/// Every state change in the tracker produces an Event.
/// Front ends print or render them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ClockStarted {
        mode: ClockMode,
        /// Countdown length in seconds; `None` for the stopwatch.
        duration_secs: Option<u64>,
        task_label: String,
        tag: String,
        at: DateTime<Utc>,
    },
    ClockPaused {
        mode: ClockMode,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    ClockResumed {
        mode: ClockMode,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero.
    CountdownFinished {
        original_secs: u64,
        at: DateTime<Utc>,
    },
    /// The one-time random adjustment was applied to a paused countdown.
    CountdownPerturbed {
        offset_secs: i64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ClockStopped {
        mode: ClockMode,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: ClockMode,
        to: ClockMode,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        session: RecordedSession,
    },
    StateSnapshot {
        mode: ClockMode,
        state: ClockState,
        display: String,
        elapsed_secs: u64,
        /// Countdown only.
        remaining_secs: Option<u64>,
        perturbed: bool,
        task_label: String,
        tag: String,
        at: DateTime<Utc>,
    },
}

/// Convert an epoch-millisecond reading into an event timestamp.
pub(crate) fn at_ms(now_ms: u64) -> DateTime<Utc> {
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_default()
}
