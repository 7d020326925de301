//! The two machines behind a single active-mode switch.

use serde::{Deserialize, Serialize};

use super::{ClockMode, ClockState, Countdown, Stopwatch, Tick, TickScheduler};
use crate::events::{at_ms, Event};
use crate::input::{format_hms, format_mmss};

/// What happens when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Record the session and return to idle immediately.
    #[default]
    Auto,
    /// Hold at 00:00 until the user stops explicitly.
    AwaitStop,
}

/// Result of a stop transition, handed to the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopOutcome {
    pub mode: ClockMode,
    pub elapsed_secs: u64,
}

/// Countdown + stopwatch, the current task text and the selected tag.
#[derive(Debug, Clone)]
pub struct SessionClock {
    mode: ClockMode,
    countdown: Countdown,
    stopwatch: Stopwatch,
    task_label: String,
    tag: String,
    policy: CompletionPolicy,
    scheduler: TickScheduler,
}

impl SessionClock {
    pub fn new(countdown_secs: u64, tag: impl Into<String>, policy: CompletionPolicy) -> Self {
        Self {
            mode: ClockMode::Countdown,
            countdown: Countdown::new(countdown_secs),
            stopwatch: Stopwatch::new(),
            task_label: String::new(),
            tag: tag.into(),
            policy,
            scheduler: TickScheduler::new(),
        }
    }

    /// Reassemble a clock from restored parts. A machine that was running
    /// when the state was saved is subscribed again.
    pub(crate) fn from_parts(
        mode: ClockMode,
        countdown: Countdown,
        stopwatch: Stopwatch,
        task_label: String,
        tag: String,
        policy: CompletionPolicy,
    ) -> Self {
        let mut clock = Self {
            mode,
            countdown,
            stopwatch,
            task_label,
            tag,
            policy,
            scheduler: TickScheduler::new(),
        };
        if clock.state() == ClockState::Running {
            clock.scheduler.subscribe(mode);
        }
        clock
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// State of the active machine.
    pub fn state(&self) -> ClockState {
        match self.mode {
            ClockMode::Countdown => self.countdown.state(),
            ClockMode::Stopwatch => self.stopwatch.state(),
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn task_label(&self) -> &str {
        &self.task_label
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self.mode {
            ClockMode::Countdown => self.countdown.elapsed_secs(),
            ClockMode::Stopwatch => self.stopwatch.elapsed_secs(),
        }
    }

    /// `MM:SS` remaining for the countdown, `HH:MM:SS` elapsed for the stopwatch.
    pub fn display(&self) -> String {
        match self.mode {
            ClockMode::Countdown => format_mmss(self.countdown.remaining_secs()),
            ClockMode::Stopwatch => format_hms(self.stopwatch.elapsed_secs()),
        }
    }

    /// The tick a driver loop should deliver, or `None` when nothing runs.
    pub fn current_tick(&self) -> Option<Tick> {
        self.scheduler.current()
    }

    pub fn snapshot(&self, now_ms: u64) -> Event {
        let remaining_secs = match self.mode {
            ClockMode::Countdown => Some(self.countdown.remaining_secs()),
            ClockMode::Stopwatch => None,
        };
        Event::StateSnapshot {
            mode: self.mode,
            state: self.state(),
            display: self.display(),
            elapsed_secs: self.elapsed_secs(),
            remaining_secs,
            perturbed: self.countdown.is_perturbed(),
            task_label: self.task_label.clone(),
            tag: self.tag.clone(),
            at: at_ms(now_ms),
        }
    }

    // ── Setup ────────────────────────────────────────────────────────

    pub fn set_task_label(&mut self, label: &str) {
        self.task_label = label.to_string();
    }

    pub(crate) fn clear_task_label(&mut self) {
        self.task_label.clear();
    }

    /// Callers are expected to have checked tag membership.
    pub(crate) fn set_tag(&mut self, tag: &str) {
        self.tag = tag.to_string();
    }

    pub fn set_policy(&mut self, policy: CompletionPolicy) {
        self.policy = policy;
    }

    /// Only honoured while the countdown is idle.
    pub fn set_countdown_duration(&mut self, secs: u64) -> bool {
        self.countdown.set_duration(secs)
    }

    /// Bring the other machine to the front. A running machine is paused
    /// first so that no tick source survives the switch.
    pub fn switch_mode(&mut self, mode: ClockMode, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if mode == self.mode {
            return events;
        }
        if let Some(paused) = self.pause(now_ms) {
            events.push(paused);
        }
        self.scheduler.unsubscribe();
        let from = self.mode;
        self.mode = mode;
        tracing::debug!(%from, to = %mode, "switched clock mode");
        events.push(Event::ModeSwitched {
            from,
            to: mode,
            at: at_ms(now_ms),
        });
        events
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the active machine. Refused while the task label is blank.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        if self.task_label.trim().is_empty() {
            tracing::debug!("start refused: task label is empty");
            return None;
        }
        let started = match self.mode {
            ClockMode::Countdown => self.countdown.start(),
            ClockMode::Stopwatch => self.stopwatch.start(now_ms),
        };
        if !started {
            return None;
        }
        self.scheduler.subscribe(self.mode);
        tracing::debug!(mode = %self.mode, "clock started");
        let duration_secs = match self.mode {
            ClockMode::Countdown => Some(self.countdown.original_secs()),
            ClockMode::Stopwatch => None,
        };
        Some(Event::ClockStarted {
            mode: self.mode,
            duration_secs,
            task_label: self.task_label.clone(),
            tag: self.tag.clone(),
            at: at_ms(now_ms),
        })
    }

    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        let paused = match self.mode {
            ClockMode::Countdown => self.countdown.pause(),
            ClockMode::Stopwatch => self.stopwatch.pause(now_ms),
        };
        if !paused {
            return None;
        }
        self.scheduler.unsubscribe();
        tracing::debug!(mode = %self.mode, elapsed = self.elapsed_secs(), "clock paused");
        Some(Event::ClockPaused {
            mode: self.mode,
            elapsed_secs: self.elapsed_secs(),
            at: at_ms(now_ms),
        })
    }

    /// Resume a paused machine. Like start, needs a task label.
    pub fn resume(&mut self, now_ms: u64) -> Option<Event> {
        if self.task_label.trim().is_empty() {
            tracing::debug!("resume refused: task label is empty");
            return None;
        }
        let resumed = match self.mode {
            ClockMode::Countdown => self.countdown.resume(),
            ClockMode::Stopwatch => self.stopwatch.resume(now_ms),
        };
        if !resumed {
            return None;
        }
        self.scheduler.subscribe(self.mode);
        tracing::debug!(mode = %self.mode, "clock resumed");
        Some(Event::ClockResumed {
            mode: self.mode,
            elapsed_secs: self.elapsed_secs(),
            at: at_ms(now_ms),
        })
    }

    /// Pause if running, otherwise start or resume.
    pub fn toggle(&mut self, now_ms: u64) -> Option<Event> {
        match self.state() {
            ClockState::Running => self.pause(now_ms),
            ClockState::Paused => self.resume(now_ms),
            ClockState::Idle => self.start(now_ms),
            ClockState::Finished => None,
        }
    }

    /// Deliver one tick. Stale ticks are ignored. Returns
    /// `CountdownFinished` when the countdown reaches zero.
    pub fn tick(&mut self, tick: Tick, now_ms: u64) -> Option<Event> {
        if !self.scheduler.is_current(tick) {
            tracing::trace!(?tick, "dropping stale tick");
            return None;
        }
        match tick.mode {
            ClockMode::Countdown => {
                if !self.countdown.tick() {
                    return None;
                }
                self.scheduler.unsubscribe();
                tracing::debug!(original = self.countdown.original_secs(), "countdown finished");
                Some(Event::CountdownFinished {
                    original_secs: self.countdown.original_secs(),
                    at: at_ms(now_ms),
                })
            }
            ClockMode::Stopwatch => {
                self.stopwatch.tick(now_ms);
                None
            }
        }
    }

    /// Stop the active machine and reset it. `None` if it was idle.
    pub fn stop(&mut self, now_ms: u64) -> Option<StopOutcome> {
        let elapsed_secs = match self.mode {
            ClockMode::Countdown => self.countdown.stop(),
            ClockMode::Stopwatch => self.stopwatch.stop(now_ms),
        }?;
        self.scheduler.unsubscribe();
        tracing::debug!(mode = %self.mode, elapsed = elapsed_secs, "clock stopped");
        Some(StopOutcome {
            mode: self.mode,
            elapsed_secs,
        })
    }

    /// Apply the one-time random adjustment to a paused countdown.
    pub fn perturb<R: rand::Rng>(
        &mut self,
        rng: &mut R,
        bound_min: u32,
        now_ms: u64,
    ) -> Option<Event> {
        if self.mode != ClockMode::Countdown {
            return None;
        }
        let offset_secs = self.countdown.perturb(rng, bound_min)?;
        tracing::debug!(offset_secs, "countdown perturbed");
        Some(Event::CountdownPerturbed {
            offset_secs,
            remaining_secs: self.countdown.remaining_secs(),
            at: at_ms(now_ms),
        })
    }

    /// Cancel any tick subscription without changing machine state.
    /// A running machine stays `Running` until [`reattach`](Self::reattach).
    pub fn teardown(&mut self) {
        self.scheduler.unsubscribe();
    }

    /// Subscribe again after [`teardown`](Self::teardown). Returns the new
    /// tick, or `None` when the active machine is not running.
    pub fn reattach(&mut self) -> Option<Tick> {
        if self.state() != ClockState::Running {
            return None;
        }
        if let Some(tick) = self.scheduler.current() {
            return Some(tick);
        }
        tracing::debug!(mode = %self.mode, "tick source reattached");
        Some(self.scheduler.subscribe(self.mode))
    }
}
