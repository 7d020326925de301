//! The tracker: clock, session log and tag set bound to a store.
//!
//! State is loaded once in [`Tracker::load`] and written back after every
//! change. Writes are last-write-wins and are not atomic across keys.
//!
//! ```ignore
//! let mut tracker = Tracker::load(SqliteStore::open()?, Config::load()?);
//! tracker.set_task_label("write docs");
//! tracker.start(Local::now());
//! while let Some(tick) = tracker.clock().current_tick() {
//!     // once per second:
//!     tracker.tick(tick, Local::now());
//! }
//! ```

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use crate::clock::{ClockMode, CompletionPolicy, SessionClock, Tick};
use crate::events::Event;
use crate::input::parse_duration_fields;
use crate::session::{record_completed_session, RecordedSession, SessionLog, TagSet};
use crate::stats::Dashboard;
use crate::storage::state::{self, ClockDefaults};
use crate::storage::{Config, KvStore};

pub struct Tracker<S: KvStore> {
    store: S,
    config: Config,
    clock: SessionClock,
    log: SessionLog,
    tags: TagSet,
    rng: Mcg128Xsl64,
}

impl<S: KvStore> Tracker<S> {
    /// Restore everything from `store`, falling back to defaults from `config`.
    pub fn load(store: S, config: Config) -> Self {
        let tags = state::load_tags(&store, &config.tags.default_tag);
        let log = state::load_sessions(&store);
        let defaults = ClockDefaults {
            countdown_secs: config.countdown.default_secs(),
            default_tag: tags.default_tag().to_string(),
            policy: config.countdown.completion,
        };
        let mut clock = state::load_clock(&store, &defaults);
        if !tags.contains(clock.tag()) {
            clock.set_tag(tags.default_tag());
        }
        tracing::debug!(
            sessions = log.len(),
            tags = tags.tags().len(),
            mode = %clock.mode(),
            state = %clock.state(),
            "tracker loaded"
        );
        Self {
            store,
            config,
            clock,
            log,
            tags,
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Use a fixed seed for the perturbation draw.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mcg128Xsl64::seed_from_u64(seed);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self, now: DateTime<Local>) -> Event {
        self.clock.snapshot(epoch_ms(now))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard::build(&self.log, &self.tags, today, self.config.stats.window_days())
    }

    // ── Setup ────────────────────────────────────────────────────────

    pub fn set_task_label(&mut self, label: &str) {
        self.clock.set_task_label(label);
        self.save_clock();
    }

    /// Select the tag for the next recording. Unknown tags are refused.
    pub fn select_tag(&mut self, tag: &str) -> bool {
        if !self.tags.contains(tag) {
            return false;
        }
        self.clock.set_tag(tag);
        self.save_clock();
        true
    }

    /// Change the countdown length. Only while the countdown is idle.
    pub fn set_countdown_duration(&mut self, secs: u64) -> bool {
        let changed = self.clock.set_countdown_duration(secs);
        if changed {
            self.save_clock();
        }
        changed
    }

    /// Change the countdown length from minute/second text fields.
    pub fn edit_countdown_duration(&mut self, minutes: &str, seconds: &str) -> bool {
        self.set_countdown_duration(parse_duration_fields(minutes, seconds))
    }

    pub fn switch_mode(&mut self, mode: ClockMode, now: DateTime<Local>) -> Vec<Event> {
        let events = self.clock.switch_mode(mode, epoch_ms(now));
        if !events.is_empty() {
            self.save_clock();
        }
        events
    }

    // ── Clock ────────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Local>) -> Option<Event> {
        let event = self.clock.start(epoch_ms(now))?;
        self.save_clock();
        Some(event)
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Event> {
        let event = self.clock.pause(epoch_ms(now))?;
        self.save_clock();
        Some(event)
    }

    pub fn resume(&mut self, now: DateTime<Local>) -> Option<Event> {
        let event = self.clock.resume(epoch_ms(now))?;
        self.save_clock();
        Some(event)
    }

    pub fn toggle(&mut self, now: DateTime<Local>) -> Option<Event> {
        let event = self.clock.toggle(epoch_ms(now))?;
        self.save_clock();
        Some(event)
    }

    /// Deliver a tick. With the `auto` policy a countdown that reaches
    /// zero is stopped and recorded within the same call.
    pub fn tick(&mut self, tick: Tick, now: DateTime<Local>) -> Vec<Event> {
        if self.clock.current_tick() != Some(tick) {
            return Vec::new();
        }
        let mut events: Vec<Event> = self.clock.tick(tick, epoch_ms(now)).into_iter().collect();
        let finished = events
            .iter()
            .any(|e| matches!(e, Event::CountdownFinished { .. }));
        if finished && self.clock.policy() == CompletionPolicy::Auto {
            events.extend(self.stop(now));
        } else {
            self.save_clock();
        }
        events
    }

    /// Stop the active machine and record what it measured.
    ///
    /// Yields `ClockStopped`, followed by `SessionRecorded` when a session
    /// was actually written. Empty when the clock was idle.
    pub fn stop(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let now_ms = epoch_ms(now);
        let Some(outcome) = self.clock.stop(now_ms) else {
            return Vec::new();
        };
        let mut events = vec![Event::ClockStopped {
            mode: outcome.mode,
            elapsed_secs: outcome.elapsed_secs,
            at: now.with_timezone(&Utc),
        }];
        let recorded = record_completed_session(
            &mut self.log,
            &outcome,
            self.clock.task_label(),
            self.clock.tag(),
            now,
        );
        if let Some(session) = recorded {
            self.clock.clear_task_label();
            self.save_sessions();
            events.push(Event::SessionRecorded { session });
        }
        self.save_clock();
        events
    }

    /// Apply the one-time random adjustment to a paused countdown.
    pub fn perturb(&mut self, now: DateTime<Local>) -> Option<Event> {
        let bound = self.config.countdown.perturb_bound();
        let event = self.clock.perturb(&mut self.rng, bound, epoch_ms(now))?;
        self.save_clock();
        Some(event)
    }

    /// Cancel the tick subscription, e.g. when the front end goes away.
    pub fn teardown(&mut self) {
        self.clock.teardown();
    }

    /// Pick a running clock back up after [`teardown`](Self::teardown).
    pub fn reattach(&mut self) -> Option<Tick> {
        self.clock.reattach()
    }

    // ── Tags & sessions ──────────────────────────────────────────────

    pub fn add_tag(&mut self, name: &str) -> bool {
        let added = self.tags.add(name);
        if added {
            self.save_tags();
        }
        added
    }

    /// Remove a tag, moving its sessions (and the selection, if it pointed
    /// at the tag) to the default tag. Returns how many sessions moved.
    pub fn remove_tag(&mut self, name: &str) -> Option<usize> {
        let moved = self.tags.remove(name, &mut self.log)?;
        if self.clock.tag() == name {
            self.clock.set_tag(self.tags.default_tag());
            self.save_clock();
        }
        self.save_tags();
        if moved > 0 {
            self.save_sessions();
        }
        Some(moved)
    }

    pub fn rename_session(&mut self, id: u64, label: &str) -> bool {
        let renamed = self.log.rename(id, label);
        if renamed {
            self.save_sessions();
        }
        renamed
    }

    pub fn delete_session(&mut self, id: u64) -> Option<RecordedSession> {
        let deleted = self.log.delete(id)?;
        tracing::info!(id, "session deleted");
        self.save_sessions();
        Some(deleted)
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn save_clock(&mut self) {
        state::save_clock(&mut self.store, &self.clock);
    }

    fn save_sessions(&mut self) {
        state::save_sessions(&mut self.store, &self.log);
    }

    fn save_tags(&mut self) {
        state::save_tags(&mut self.store, &self.tags);
    }
}

fn epoch_ms(now: DateTime<Local>) -> u64 {
    u64::try_from(now.timestamp_millis()).unwrap_or(0)
}
