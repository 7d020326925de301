//! Persisted layout of the tracker inside a [`KvStore`].
//!
//! The session log and tag set are JSON arrays under one key each. The
//! clock is spread over one scalar per key so an in-progress session
//! survives a restart. Store failures are logged and read as "absent"; a
//! value that fails to parse falls back to its default on its own, without
//! discarding the rest of the snapshot.

use std::str::FromStr;

use super::kv::KvStore;
use crate::clock::{ClockMode, ClockState, CompletionPolicy, Countdown, SessionClock, Stopwatch};
use crate::input::parse_or_zero;
use crate::session::{RecordedSession, SessionLog, TagSet};

pub const SESSIONS_KEY: &str = "sessions";
pub const TAGS_KEY: &str = "tags";

pub const CLOCK_MODE_KEY: &str = "clock.mode";
pub const CLOCK_TASK_KEY: &str = "clock.task";
pub const CLOCK_TAG_KEY: &str = "clock.tag";
pub const COUNTDOWN_STATE_KEY: &str = "countdown.state";
pub const COUNTDOWN_CONFIGURED_KEY: &str = "countdown.configured_secs";
pub const COUNTDOWN_REMAINING_KEY: &str = "countdown.remaining_secs";
pub const COUNTDOWN_ORIGINAL_KEY: &str = "countdown.original_secs";
pub const COUNTDOWN_PERTURBED_KEY: &str = "countdown.perturbed";
pub const STOPWATCH_STATE_KEY: &str = "stopwatch.state";
pub const STOPWATCH_ACCUMULATED_KEY: &str = "stopwatch.accumulated_ms";
pub const STOPWATCH_ANCHOR_KEY: &str = "stopwatch.anchor_ms";
pub const STOPWATCH_ELAPSED_KEY: &str = "stopwatch.elapsed_secs";

/// Defaults used for anything missing from the store.
#[derive(Debug, Clone)]
pub struct ClockDefaults {
    pub countdown_secs: u64,
    pub default_tag: String,
    pub policy: CompletionPolicy,
}

// ── Sessions ─────────────────────────────────────────────────────────

pub fn load_sessions<S: KvStore + ?Sized>(store: &S) -> SessionLog {
    let Some(json) = read(store, SESSIONS_KEY) else {
        return SessionLog::new();
    };
    match serde_json::from_str::<Vec<RecordedSession>>(&json) {
        Ok(sessions) => SessionLog::from_sessions(sessions),
        Err(e) => {
            tracing::warn!(key = SESSIONS_KEY, error = %e, "discarding unreadable session log");
            SessionLog::new()
        }
    }
}

pub fn save_sessions<S: KvStore + ?Sized>(store: &mut S, log: &SessionLog) {
    match serde_json::to_string(log) {
        Ok(json) => write(store, SESSIONS_KEY, &json),
        Err(e) => tracing::warn!(error = %e, "could not encode session log"),
    }
}

// ── Tags ─────────────────────────────────────────────────────────────

pub fn load_tags<S: KvStore + ?Sized>(store: &S, default_tag: &str) -> TagSet {
    let stored = read(store, TAGS_KEY).and_then(|json| {
        serde_json::from_str::<Vec<String>>(&json)
            .map_err(|e| tracing::warn!(key = TAGS_KEY, error = %e, "discarding unreadable tags"))
            .ok()
    });
    match stored {
        Some(tags) => TagSet::from_tags(tags, default_tag),
        None => TagSet::new(default_tag),
    }
}

pub fn save_tags<S: KvStore + ?Sized>(store: &mut S, tags: &TagSet) {
    match serde_json::to_string(tags) {
        Ok(json) => write(store, TAGS_KEY, &json),
        Err(e) => tracing::warn!(error = %e, "could not encode tags"),
    }
}

// ── Clock ────────────────────────────────────────────────────────────

pub fn load_clock<S: KvStore + ?Sized>(store: &S, defaults: &ClockDefaults) -> SessionClock {
    let mode = read_parsed(store, CLOCK_MODE_KEY).unwrap_or_default();
    let task_label = read(store, CLOCK_TASK_KEY).unwrap_or_default();
    let tag = read(store, CLOCK_TAG_KEY)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| defaults.default_tag.clone());

    let configured_secs = read(store, COUNTDOWN_CONFIGURED_KEY)
        .map(|v| parse_or_zero(&v))
        .unwrap_or(defaults.countdown_secs);
    let countdown = Countdown::from_parts(
        read_parsed(store, COUNTDOWN_STATE_KEY).unwrap_or_default(),
        configured_secs,
        read_secs(store, COUNTDOWN_REMAINING_KEY),
        read_secs(store, COUNTDOWN_ORIGINAL_KEY),
        read_parsed::<bool, _>(store, COUNTDOWN_PERTURBED_KEY).unwrap_or(false),
    );

    let stopwatch = Stopwatch::from_parts(
        read_parsed(store, STOPWATCH_STATE_KEY).unwrap_or_default(),
        read_secs(store, STOPWATCH_ACCUMULATED_KEY),
        read_parsed(store, STOPWATCH_ANCHOR_KEY),
    );

    SessionClock::from_parts(mode, countdown, stopwatch, task_label, tag, defaults.policy)
}

pub fn save_clock<S: KvStore + ?Sized>(store: &mut S, clock: &SessionClock) {
    let countdown = clock.countdown();
    let stopwatch = clock.stopwatch();

    write(store, CLOCK_MODE_KEY, clock.mode().as_str());
    write(store, CLOCK_TASK_KEY, clock.task_label());
    write(store, CLOCK_TAG_KEY, clock.tag());

    write(store, COUNTDOWN_STATE_KEY, countdown.state().as_str());
    write(store, COUNTDOWN_CONFIGURED_KEY, &countdown.configured_secs().to_string());
    write(store, COUNTDOWN_REMAINING_KEY, &countdown.remaining_secs().to_string());
    write(store, COUNTDOWN_ORIGINAL_KEY, &countdown.original_secs().to_string());
    write(store, COUNTDOWN_PERTURBED_KEY, &countdown.is_perturbed().to_string());

    write(store, STOPWATCH_STATE_KEY, stopwatch.state().as_str());
    write(store, STOPWATCH_ACCUMULATED_KEY, &stopwatch.accumulated_ms().to_string());
    write(store, STOPWATCH_ELAPSED_KEY, &stopwatch.elapsed_secs().to_string());
    match stopwatch.anchor_ms() {
        Some(anchor) => write(store, STOPWATCH_ANCHOR_KEY, &anchor.to_string()),
        None => erase(store, STOPWATCH_ANCHOR_KEY),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn read<S: KvStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, using default");
            None
        }
    }
}

fn read_parsed<T, S>(store: &S, key: &str) -> Option<T>
where
    T: FromStr,
    S: KvStore + ?Sized,
{
    read(store, key)?.trim().parse().ok()
}

fn read_secs<S: KvStore + ?Sized>(store: &S, key: &str) -> u64 {
    read(store, key).map(|v| parse_or_zero(&v)).unwrap_or(0)
}

fn write<S: KvStore + ?Sized>(store: &mut S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, error = %e, "store write failed");
    }
}

fn erase<S: KvStore + ?Sized>(store: &mut S, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key, error = %e, "store remove failed");
    }
}
