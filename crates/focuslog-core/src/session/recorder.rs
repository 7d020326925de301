use chrono::{DateTime, Local, Utc};

use super::{RecordedSession, SessionLog};
use crate::clock::StopOutcome;

/// Turn a stop outcome into a recorded session and append it to `log`.
///
/// Nothing is recorded when no time elapsed or the task label is blank.
/// The caller clears its task label when `Some` is returned.
pub fn record_completed_session(
    log: &mut SessionLog,
    outcome: &StopOutcome,
    task_label: &str,
    tag: &str,
    now: DateTime<Local>,
) -> Option<RecordedSession> {
    let task_label = task_label.trim();
    if outcome.elapsed_secs == 0 || task_label.is_empty() {
        tracing::debug!(
            elapsed = outcome.elapsed_secs,
            "nothing to record for this stop"
        );
        return None;
    }

    let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let session = RecordedSession {
        id: log.next_id(now_ms),
        task_label: task_label.to_string(),
        tag: tag.to_string(),
        duration_secs: outcome.elapsed_secs,
        kind: outcome.mode,
        date: now.date_naive(),
        recorded_at: now.with_timezone(&Utc),
    };
    tracing::info!(
        id = session.id,
        tag = %session.tag,
        duration_secs = session.duration_secs,
        "session recorded"
    );
    log.push(session.clone());
    Some(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockMode;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 6, 14, 30, 0).unwrap()
    }

    #[test]
    fn zero_elapsed_records_nothing() {
        let mut log = SessionLog::new();
        let outcome = StopOutcome {
            mode: ClockMode::Countdown,
            elapsed_secs: 0,
        };
        assert!(record_completed_session(&mut log, &outcome, "anything", "Other", now()).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn blank_label_records_nothing() {
        let mut log = SessionLog::new();
        let outcome = StopOutcome {
            mode: ClockMode::Stopwatch,
            elapsed_secs: 30,
        };
        assert!(record_completed_session(&mut log, &outcome, "  ", "Other", now()).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn records_observed_duration_and_local_date() {
        let mut log = SessionLog::new();
        let outcome = StopOutcome {
            mode: ClockMode::Countdown,
            elapsed_secs: 1_234,
        };
        let session =
            record_completed_session(&mut log, &outcome, " review PR ", "Work", now()).unwrap();
        assert_eq!(session.task_label, "review PR");
        assert_eq!(session.tag, "Work");
        assert_eq!(session.duration_secs, 1_234);
        assert_eq!(session.kind, ClockMode::Countdown);
        assert_eq!(session.date, now().date_naive());
        assert_eq!(log.sessions(), &[session]);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut log = SessionLog::new();
        let outcome = StopOutcome {
            mode: ClockMode::Stopwatch,
            elapsed_secs: 5,
        };
        let a = record_completed_session(&mut log, &outcome, "a", "Other", now()).unwrap();
        let b = record_completed_session(&mut log, &outcome, "b", "Other", now()).unwrap();
        assert!(b.id > a.id);
    }
}
