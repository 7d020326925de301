//! Property tests for the clock accounting rules.
//!
//! The stopwatch must equal the floored sum of its running spans, and the
//! countdown must report `original - remaining` as elapsed at every step,
//! whatever order of pauses, resumes and perturbations occurs.

use focuslog_core::clock::{Countdown, Stopwatch};
use focuslog_core::ClockState;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

#[derive(Debug, Clone)]
enum Step {
    Tick,
    Pause,
    Resume,
    Perturb(i64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Tick),
        1 => Just(Step::Pause),
        1 => Just(Step::Resume),
        1 => (-600i64..=600).prop_map(Step::Perturb),
    ]
}

proptest! {
    #[test]
    fn stopwatch_equals_sum_of_running_spans(
        spans in prop::collection::vec((0u64..120_000, 0u64..600_000), 1..12)
    ) {
        let mut sw = Stopwatch::new();
        let mut now = 1_000_000u64;
        let mut running_ms = 0u64;
        prop_assert!(sw.start(now));
        for (i, (run, idle)) in spans.iter().enumerate() {
            now += run;
            running_ms += run;
            sw.tick(now);
            prop_assert!(sw.pause(now));
            prop_assert_eq!(sw.elapsed_secs(), running_ms / 1000);
            now += idle;
            if i + 1 < spans.len() {
                prop_assert!(sw.resume(now));
            }
        }
        prop_assert_eq!(sw.stop(now + 99_999), Some(running_ms / 1000));
        prop_assert_eq!(sw.state(), ClockState::Idle);
    }

    #[test]
    fn countdown_elapsed_is_original_minus_remaining(
        secs in 1u64..400,
        steps in prop::collection::vec(step(), 0..300),
    ) {
        let mut cd = Countdown::new(secs);
        prop_assert!(cd.start());
        let mut counted_ticks = 0u64;
        for step in steps {
            match step {
                Step::Tick => {
                    if cd.state() == ClockState::Running && cd.remaining_secs() > 0 {
                        counted_ticks += 1;
                    }
                    cd.tick();
                }
                Step::Pause => {
                    cd.pause();
                }
                Step::Resume => {
                    cd.resume();
                }
                Step::Perturb(offset) => {
                    cd.apply_offset(offset);
                }
            }
            prop_assert_eq!(
                cd.elapsed_secs(),
                cd.original_secs() - cd.remaining_secs()
            );
            prop_assert!(cd.remaining_secs() <= cd.original_secs());
            prop_assert_eq!(cd.elapsed_secs(), counted_ticks);
            if cd.state() == ClockState::Finished {
                prop_assert_eq!(cd.remaining_secs(), 0);
                break;
            }
        }
    }

    #[test]
    fn random_perturbation_stays_in_bounds(
        secs in 1u64..3_600,
        ticks in 0u64..60,
        bound in 0u32..20,
        seed in any::<u64>(),
    ) {
        let mut cd = Countdown::new(secs);
        cd.start();
        for _ in 0..ticks {
            cd.tick();
        }
        let elapsed = cd.elapsed_secs();
        let remaining = cd.remaining_secs();
        if cd.pause() {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let offset = cd.perturb(&mut rng, bound).unwrap();
            let cap = i64::from(bound.min(10)) * 60;
            prop_assert!(offset.abs() <= cap);
            prop_assert!(offset >= -(remaining as i64));
            prop_assert_eq!(cd.elapsed_secs(), elapsed);
            prop_assert!(cd.perturb(&mut rng, bound).is_none());
        }
    }
}
