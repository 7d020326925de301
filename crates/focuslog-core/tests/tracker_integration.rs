//! Integration tests for the tracker on top of the SQLite store.
//!
//! Covers the full loop a front end runs: record sessions across several
//! days, reopen the database file, and read the dashboard back.

use chrono::{DateTime, Duration, Local, TimeZone};
use focuslog_core::stats::{sessions_on_date, totals_by_tag};
use focuslog_core::{ClockMode, ClockState, Config, Event, SqliteStore, Tracker};

fn day(d: u32, h: u32, m: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, d, h, m, 0).unwrap()
}

fn record_stopwatch(tracker: &mut Tracker<SqliteStore>, label: &str, from: DateTime<Local>, secs: i64) {
    tracker.set_task_label(label);
    tracker.start(from).unwrap();
    let events = tracker.stop(from + Duration::seconds(secs));
    assert!(
        events.iter().any(|e| matches!(e, Event::SessionRecorded { .. })),
        "expected {label} to be recorded"
    );
}

#[test]
fn sessions_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focuslog.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut tracker = Tracker::load(store, Config::default());
        tracker.add_tag("Work");
        tracker.add_tag("Study");
        tracker.switch_mode(ClockMode::Stopwatch, day(1, 8, 0));

        tracker.select_tag("Work");
        record_stopwatch(&mut tracker, "standup", day(1, 9, 0), 15 * 60);
        record_stopwatch(&mut tracker, "review", day(2, 9, 0), 45 * 60);
        tracker.select_tag("Study");
        record_stopwatch(&mut tracker, "rust book", day(2, 20, 0), 30 * 60 + 59);
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let tracker = Tracker::load(store, Config::default());
    assert_eq!(tracker.log().len(), 3);
    assert_eq!(tracker.tags().tags(), &["Other", "Work", "Study"]);
    assert_eq!(tracker.clock().mode(), ClockMode::Stopwatch);
    assert_eq!(tracker.clock().tag(), "Study");

    let totals = totals_by_tag(tracker.log());
    assert_eq!(totals["Work"], 60 * 60);
    assert_eq!(totals["Study"], 30 * 60 + 59);

    let dash = tracker.dashboard(day(3, 12, 0).date_naive());
    assert_eq!(dash.daily.len(), 7);
    let may2 = dash.daily.iter().find(|b| b.date == day(2, 0, 0).date_naive()).unwrap();
    assert_eq!(may2.minutes_for("Work"), 45);
    assert_eq!(may2.minutes_for("Study"), 30);
    assert_eq!(may2.total_minutes, 75);
    assert_eq!(dash.summary.session_count, 3);

    let timeline = sessions_on_date(tracker.log(), day(2, 0, 0).date_naive(), &[]);
    let labels: Vec<&str> = timeline.iter().map(|s| s.task_label.as_str()).collect();
    assert_eq!(labels, ["review", "rust book"]);
}

#[test]
fn paused_countdown_resumes_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focuslog.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut tracker = Tracker::load(store, Config::default());
        tracker.set_countdown_duration(120);
        tracker.set_task_label("essay");
        tracker.start(day(4, 10, 0)).unwrap();
        for i in 1..=20 {
            let tick = tracker.clock().current_tick().unwrap();
            tracker.tick(tick, day(4, 10, 0) + Duration::seconds(i));
        }
        tracker.pause(day(4, 10, 1)).unwrap();
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let mut tracker = Tracker::load(store, Config::default());
    assert_eq!(tracker.clock().state(), ClockState::Paused);
    assert_eq!(tracker.clock().elapsed_secs(), 20);
    assert_eq!(tracker.clock().display(), "01:40");
    assert_eq!(tracker.clock().task_label(), "essay");

    tracker.resume(day(4, 11, 0)).unwrap();
    let events = tracker.stop(day(4, 11, 0));
    let Some(Event::SessionRecorded { session }) = events.last() else {
        panic!("expected a recorded session, got {events:?}");
    };
    assert_eq!(session.duration_secs, 20);
    assert_eq!(session.kind, ClockMode::Countdown);
    assert_eq!(session.tag, "Other");
}

#[test]
fn config_driven_defaults_apply_to_a_fresh_store() {
    let mut config = Config::default();
    config.set("countdown.default_minutes", "50").unwrap();
    config.set("tags.default_tag", "Misc").unwrap();

    let tracker = Tracker::load(SqliteStore::open_memory().unwrap(), config);
    assert_eq!(tracker.clock().countdown().remaining_secs(), 50 * 60);
    assert_eq!(tracker.tags().default_tag(), "Misc");
    assert_eq!(tracker.clock().tag(), "Misc");
}
