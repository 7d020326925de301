//! One-second tick source subscription.
//!
//! The clock subscribes when a machine enters `Running` and unsubscribes on
//! any other transition. Every subscription gets a fresh generation; a tick
//! carrying an older generation comes from a timer that should already have
//! been cancelled and is dropped.

use serde::{Deserialize, Serialize};

use super::ClockMode;

/// A tick handed to the driver loop for delivery back to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub mode: ClockMode,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    generation: u64,
    active: Option<ClockMode>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subscription for `mode`, invalidating any previous one.
    pub fn subscribe(&mut self, mode: ClockMode) -> Tick {
        self.generation += 1;
        self.active = Some(mode);
        Tick {
            mode,
            generation: self.generation,
        }
    }

    /// Cancel the current subscription. Safe to call when none is active.
    pub fn unsubscribe(&mut self) {
        if self.active.take().is_some() {
            self.generation += 1;
        }
    }

    /// The tick the driver should deliver next, if anything is subscribed.
    pub fn current(&self) -> Option<Tick> {
        self.active.map(|mode| Tick {
            mode,
            generation: self.generation,
        })
    }

    pub fn is_current(&self, tick: Tick) -> bool {
        self.current() == Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resubscribing_invalidates_old_ticks() {
        let mut sched = TickScheduler::new();
        let first = sched.subscribe(ClockMode::Stopwatch);
        assert!(sched.is_current(first));

        sched.unsubscribe();
        assert!(!sched.is_current(first));
        assert_eq!(sched.current(), None);

        let second = sched.subscribe(ClockMode::Stopwatch);
        assert!(sched.is_current(second));
        assert!(!sched.is_current(first));
    }

    #[test]
    fn ticks_for_other_mode_are_not_current() {
        let mut sched = TickScheduler::new();
        let tick = sched.subscribe(ClockMode::Countdown);
        let forged = Tick {
            mode: ClockMode::Stopwatch,
            ..tick
        };
        assert!(!sched.is_current(forged));
    }

    #[test]
    fn unsubscribe_without_subscription_is_harmless() {
        let mut sched = TickScheduler::new();
        sched.unsubscribe();
        assert_eq!(sched.current(), None);
    }
}
