use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use focuslog_core::{ClockMode, SqliteStore, Tracker};

use super::{open_tracker, print_json, CommandResult};

#[derive(Subcommand)]
pub enum ClockAction {
    /// Start the active clock
    Start {
        /// Task label (replaces the current one)
        #[arg(long)]
        task: Option<String>,
        /// Tag to record the session under
        #[arg(long)]
        tag: Option<String>,
    },
    /// Pause the running clock
    Pause,
    /// Resume a paused clock
    Resume,
    /// Pause if running, otherwise start or resume
    Toggle,
    /// Stop the clock and record the session
    Stop,
    /// Print current clock state as JSON
    Status,
    /// Switch between countdown and stopwatch
    Mode {
        /// "countdown" (or "timer") / "stopwatch"
        mode: ClockMode,
    },
    /// Set the countdown length while idle
    Duration {
        minutes: String,
        /// Seconds of 60 or more carry into minutes
        #[arg(default_value = "0")]
        seconds: String,
    },
    /// Set the task label
    Task { label: String },
    /// Select the tag for the next session
    Tag { name: String },
    /// Randomly adjust a paused countdown, once per session
    Perturb,
    /// Drive the running clock every second until it stops or Ctrl-C
    Watch,
}

fn refused(action: &str, tracker: &Tracker<SqliteStore>) -> String {
    let clock = tracker.clock();
    if matches!(action, "start" | "resume") && clock.task_label().trim().is_empty() {
        return format!("cannot {action}: task label is empty");
    }
    format!("cannot {action}: {} is {}", clock.mode(), clock.state())
}

pub fn run(action: ClockAction) -> CommandResult {
    let mut tracker = open_tracker()?;
    let now = Local::now();

    match action {
        ClockAction::Start { task, tag } => {
            if let Some(tag) = tag {
                if !tracker.select_tag(&tag) {
                    return Err(format!("unknown tag: {tag}").into());
                }
            }
            if let Some(task) = task {
                tracker.set_task_label(&task);
            }
            let event = tracker
                .start(now)
                .ok_or_else(|| refused("start", &tracker))?;
            print_json(&event)?;
        }
        ClockAction::Pause => {
            let event = tracker
                .pause(now)
                .ok_or_else(|| refused("pause", &tracker))?;
            print_json(&event)?;
        }
        ClockAction::Resume => {
            let event = tracker
                .resume(now)
                .ok_or_else(|| refused("resume", &tracker))?;
            print_json(&event)?;
        }
        ClockAction::Toggle => {
            let event = tracker
                .toggle(now)
                .ok_or_else(|| refused("toggle", &tracker))?;
            print_json(&event)?;
        }
        ClockAction::Stop => {
            let events = tracker.stop(now);
            if events.is_empty() {
                return Err(refused("stop", &tracker).into());
            }
            print_json(&events)?;
        }
        ClockAction::Status => {
            // Stopwatch ticks read the wall clock, so a status call can
            // refresh them. Countdown ticks only come from `watch`.
            if tracker.clock().mode() == ClockMode::Stopwatch {
                if let Some(tick) = tracker.clock().current_tick() {
                    tracker.tick(tick, now);
                }
            }
            print_json(&tracker.snapshot(now))?;
        }
        ClockAction::Mode { mode } => {
            let events = tracker.switch_mode(mode, now);
            if events.is_empty() {
                print_json(&tracker.snapshot(now))?;
            } else {
                print_json(&events)?;
            }
        }
        ClockAction::Duration { minutes, seconds } => {
            if !tracker.edit_countdown_duration(&minutes, &seconds) {
                return Err(refused("change duration", &tracker).into());
            }
            print_json(&tracker.snapshot(now))?;
        }
        ClockAction::Task { label } => {
            tracker.set_task_label(&label);
            print_json(&tracker.snapshot(now))?;
        }
        ClockAction::Tag { name } => {
            if !tracker.select_tag(&name) {
                return Err(format!("unknown tag: {name}").into());
            }
            print_json(&tracker.snapshot(now))?;
        }
        ClockAction::Perturb => {
            let event = tracker.perturb(now).ok_or_else(|| {
                "cannot perturb: countdown must be paused and not yet adjusted".to_string()
            })?;
            print_json(&event)?;
        }
        ClockAction::Watch => watch(&mut tracker)?,
    }
    Ok(())
}

/// Deliver one tick per second while the clock runs. Events are printed
/// as JSON lines, the display goes to stderr.
fn watch(tracker: &mut Tracker<SqliteStore>) -> CommandResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while let Some(tick) = tracker.clock().current_tick() {
            tokio::select! {
                _ = interval.tick() => {
                    for event in tracker.tick(tick, Local::now()) {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                    eprintln!("{}", tracker.clock().display());
                }
                _ = &mut ctrl_c => {
                    tracing::debug!("interrupted, leaving clock state as saved");
                    break;
                }
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    tracker.teardown();
    print_json(&tracker.snapshot(Local::now()))?;
    Ok(())
}
