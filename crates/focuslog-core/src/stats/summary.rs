use serde::{Deserialize, Serialize};

use crate::session::SessionLog;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_secs: u64,
    pub session_count: u64,
    /// Floored mean session length; 0 for an empty log.
    pub average_secs: u64,
}

impl Summary {
    pub fn from_log(log: &SessionLog) -> Self {
        let total_secs: u64 = log.sessions().iter().map(|s| s.duration_secs).sum();
        let session_count = log.len() as u64;
        let average_secs = total_secs.checked_div(session_count).unwrap_or(0);
        Self {
            total_secs,
            session_count,
            average_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockMode;
    use crate::session::RecordedSession;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn empty_log_has_zero_average() {
        assert_eq!(Summary::from_log(&SessionLog::new()), Summary::default());
    }

    #[test]
    fn average_is_floored() {
        let make = |id, secs| RecordedSession {
            id,
            task_label: "t".into(),
            tag: "Other".into(),
            duration_secs: secs,
            kind: ClockMode::Stopwatch,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            recorded_at: Utc::now(),
        };
        let log = SessionLog::from_sessions(vec![make(1, 10), make(2, 11)]);
        let summary = Summary::from_log(&log);
        assert_eq!(summary.total_secs, 21);
        assert_eq!(summary.session_count, 2);
        assert_eq!(summary.average_secs, 10);
    }
}
