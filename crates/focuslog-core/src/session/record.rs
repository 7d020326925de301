use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ClockMode;

/// One finished interval of work.
///
/// Created only by the recorder on a stop or countdown completion.
/// `duration_secs` is the time observed while running, never the configured
/// countdown length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Epoch milliseconds at recording, bumped past the previous id if needed.
    pub id: u64,
    pub task_label: String,
    pub tag: String,
    pub duration_secs: u64,
    pub kind: ClockMode,
    /// Local calendar date used for day buckets.
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}
