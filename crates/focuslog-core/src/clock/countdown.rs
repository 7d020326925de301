//! Countdown machine.
//!
//! Remaining time is decremented by exactly one second per delivered tick.
//! The amount of work done is always `original - remaining`, where
//! `original` is captured on the first start and only ever moved together
//! with `remaining` (by the one-time perturbation).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ClockState;

/// Default magnitude, in minutes, of the one-time random adjustment.
pub const DEFAULT_PERTURB_BOUND_MIN: u32 = 5;
/// The adjustment bound is never allowed above this, whatever the config says.
pub const PERTURB_HARD_CAP_MIN: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    state: ClockState,
    configured_secs: u64,
    remaining_secs: u64,
    /// Duration captured at the first start of the session; 0 before that.
    original_secs: u64,
    perturbed: bool,
}

impl Countdown {
    pub fn new(configured_secs: u64) -> Self {
        Self {
            state: ClockState::Idle,
            configured_secs,
            remaining_secs: configured_secs,
            original_secs: 0,
            perturbed: false,
        }
    }

    /// Rebuild from persisted fields, repairing anything inconsistent.
    pub(crate) fn from_parts(
        state: ClockState,
        configured_secs: u64,
        remaining_secs: u64,
        original_secs: u64,
        perturbed: bool,
    ) -> Self {
        if state == ClockState::Idle {
            return Self::new(configured_secs);
        }
        Self {
            state,
            configured_secs,
            remaining_secs,
            original_secs: original_secs.max(remaining_secs),
            perturbed,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn configured_secs(&self) -> u64 {
        self.configured_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn original_secs(&self) -> u64 {
        self.original_secs
    }

    pub fn is_perturbed(&self) -> bool {
        self.perturbed
    }

    /// Seconds actually counted down so far in this session.
    pub fn elapsed_secs(&self) -> u64 {
        self.original_secs.saturating_sub(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the configured duration. Only allowed while idle.
    pub fn set_duration(&mut self, secs: u64) -> bool {
        if self.state != ClockState::Idle {
            return false;
        }
        self.configured_secs = secs;
        self.remaining_secs = secs;
        true
    }

    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Idle || self.remaining_secs == 0 {
            return false;
        }
        if self.original_secs == 0 {
            self.original_secs = self.configured_secs;
        }
        self.state = ClockState::Running;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.state = ClockState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != ClockState::Paused {
            return false;
        }
        self.state = ClockState::Running;
        true
    }

    /// Count down one second. Returns `true` when zero is reached, at which
    /// point the machine moves to `Finished`.
    pub fn tick(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = ClockState::Finished;
            return true;
        }
        false
    }

    /// End the session and return the elapsed seconds, or `None` if the
    /// countdown was idle. Everything is reset to the configured duration.
    pub fn stop(&mut self) -> Option<u64> {
        if self.state == ClockState::Idle {
            return None;
        }
        let elapsed = self.elapsed_secs();
        *self = Self::new(self.configured_secs);
        Some(elapsed)
    }

    /// Apply the one-time random adjustment of up to `bound_min` minutes in
    /// either direction. Returns the applied offset in seconds.
    pub fn perturb<R: Rng>(&mut self, rng: &mut R, bound_min: u32) -> Option<i64> {
        if !self.can_perturb() {
            return None;
        }
        let bound = i64::from(bound_min.min(PERTURB_HARD_CAP_MIN));
        let offset_min = rng.gen_range(-bound..=bound);
        self.apply_offset(offset_min * 60)
    }

    /// Shift remaining and original time by the same signed amount.
    ///
    /// The offset is clamped so remaining never goes below zero. Only valid
    /// once per session and only while paused; otherwise `None`.
    pub fn apply_offset(&mut self, offset_secs: i64) -> Option<i64> {
        if !self.can_perturb() {
            return None;
        }
        let remaining = i64::try_from(self.remaining_secs).unwrap_or(i64::MAX);
        let applied = offset_secs.max(-remaining);
        self.remaining_secs = shift(self.remaining_secs, applied);
        self.original_secs = shift(self.original_secs, applied);
        self.perturbed = true;
        Some(applied)
    }

    fn can_perturb(&self) -> bool {
        self.state == ClockState::Paused && !self.perturbed
    }
}

fn shift(value: u64, by: i64) -> u64 {
    if by >= 0 {
        value.saturating_add(by.unsigned_abs())
    } else {
        value.saturating_sub(by.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn running(secs: u64) -> Countdown {
        let mut cd = Countdown::new(secs);
        assert!(cd.start());
        cd
    }

    #[test]
    fn first_start_captures_original() {
        let cd = running(90);
        assert_eq!(cd.original_secs(), 90);
        assert_eq!(cd.state(), ClockState::Running);
    }

    #[test]
    fn start_refused_at_zero() {
        let mut cd = Countdown::new(0);
        assert!(!cd.start());
        assert_eq!(cd.state(), ClockState::Idle);
    }

    #[test]
    fn duration_edit_only_while_idle() {
        let mut cd = running(60);
        assert!(!cd.set_duration(120));
        assert_eq!(cd.configured_secs(), 60);
        cd.stop();
        assert!(cd.set_duration(120));
        assert_eq!(cd.remaining_secs(), 120);
    }

    #[test]
    fn ticks_are_ignored_while_paused() {
        let mut cd = running(10);
        cd.tick();
        cd.pause();
        cd.tick();
        cd.tick();
        assert_eq!(cd.remaining_secs(), 9);
        assert_eq!(cd.elapsed_secs(), 1);
    }

    #[test]
    fn reaching_zero_finishes_and_floors() {
        let mut cd = running(2);
        assert!(!cd.tick());
        assert!(cd.tick());
        assert_eq!(cd.state(), ClockState::Finished);
        assert!(!cd.tick());
        assert_eq!(cd.remaining_secs(), 0);
        assert_eq!(cd.stop(), Some(2));
        assert_eq!(cd.state(), ClockState::Idle);
        assert_eq!(cd.remaining_secs(), 2);
    }

    #[test]
    fn stop_while_idle_yields_nothing() {
        let mut cd = Countdown::new(60);
        assert_eq!(cd.stop(), None);
    }

    #[test]
    fn offset_requires_pause() {
        let mut cd = running(600);
        assert_eq!(cd.apply_offset(60), None);
        cd.pause();
        assert_eq!(cd.apply_offset(60), Some(60));
        assert_eq!(cd.remaining_secs(), 660);
        assert_eq!(cd.original_secs(), 660);
    }

    #[test]
    fn negative_offset_is_clamped_and_keeps_elapsed() {
        let mut cd = running(300);
        for _ in 0..200 {
            cd.tick();
        }
        cd.pause();
        assert_eq!(cd.elapsed_secs(), 200);
        assert_eq!(cd.apply_offset(-5 * 60), Some(-100));
        assert_eq!(cd.remaining_secs(), 0);
        assert_eq!(cd.elapsed_secs(), 200);
    }

    #[test]
    fn second_perturbation_is_a_noop() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let mut cd = running(1500);
        cd.pause();
        assert!(cd.perturb(&mut rng, 5).is_some());
        let before = cd.clone();
        assert_eq!(cd.perturb(&mut rng, 5), None);
        assert_eq!(cd, before);
    }

    #[test]
    fn perturb_bound_is_capped() {
        for seed in 0..64 {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let mut cd = running(3600);
            cd.pause();
            let offset = cd.perturb(&mut rng, 60).unwrap();
            assert!(offset.abs() <= i64::from(PERTURB_HARD_CAP_MIN) * 60);
            assert_eq!(offset % 60, 0);
        }
    }

    #[test]
    fn stop_clears_perturbation_flag() {
        let mut cd = running(600);
        cd.pause();
        cd.apply_offset(120);
        cd.stop();
        assert!(!cd.is_perturbed());
        cd.start();
        cd.pause();
        assert!(cd.apply_offset(60).is_some());
    }
}
