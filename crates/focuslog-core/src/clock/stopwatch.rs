//! Stopwatch machine.
//!
//! Elapsed time is derived from wall-clock deltas, never from counting
//! ticks, so a late or skipped tick cannot lose time.

use serde::{Deserialize, Serialize};

use super::ClockState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    state: ClockState,
    /// Running time banked by previous pauses.
    accumulated_ms: u64,
    /// Wall-clock time (epoch ms) of the last start/resume; set only while running.
    anchor_ms: Option<u64>,
    elapsed_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted fields. A running stopwatch without an anchor
    /// cannot be continued and comes back paused.
    pub(crate) fn from_parts(
        state: ClockState,
        accumulated_ms: u64,
        anchor_ms: Option<u64>,
    ) -> Self {
        let (state, anchor_ms) = match (state, anchor_ms) {
            (ClockState::Running, Some(anchor)) => (ClockState::Running, Some(anchor)),
            (ClockState::Running, None) | (ClockState::Paused, _) => (ClockState::Paused, None),
            _ => return Self::new(),
        };
        Self {
            state,
            accumulated_ms,
            anchor_ms,
            elapsed_secs: accumulated_ms / 1000,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Elapsed seconds as of the last tick, pause, or resume.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn anchor_ms(&self) -> Option<u64> {
        self.anchor_ms
    }

    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state != ClockState::Idle {
            return false;
        }
        self.state = ClockState::Running;
        self.accumulated_ms = 0;
        self.anchor_ms = Some(now_ms);
        self.elapsed_secs = 0;
        true
    }

    pub fn tick(&mut self, now_ms: u64) {
        if self.state == ClockState::Running {
            self.elapsed_secs = self.running_ms(now_ms) / 1000;
        }
    }

    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.accumulated_ms = self.running_ms(now_ms);
        self.anchor_ms = None;
        self.elapsed_secs = self.accumulated_ms / 1000;
        self.state = ClockState::Paused;
        true
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state != ClockState::Paused {
            return false;
        }
        self.anchor_ms = Some(now_ms);
        self.state = ClockState::Running;
        true
    }

    /// End the session and return the elapsed seconds, or `None` if idle.
    pub fn stop(&mut self, now_ms: u64) -> Option<u64> {
        let elapsed = match self.state {
            ClockState::Idle => return None,
            ClockState::Running => self.running_ms(now_ms) / 1000,
            _ => self.accumulated_ms / 1000,
        };
        *self = Self::new();
        Some(elapsed)
    }

    fn running_ms(&self, now_ms: u64) -> u64 {
        let live = self
            .anchor_ms
            .map(|anchor| now_ms.saturating_sub(anchor))
            .unwrap_or(0);
        self.accumulated_ms.saturating_add(live)
    }
}
