use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focuslog_core::stats::{daily_series, tag_distribution, totals_by_tag, MAX_WINDOW_DAYS};
use focuslog_core::Summary;

use super::{open_tracker, print_json, CommandResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Total seconds per tag
    Totals,
    /// Minutes per tag per day for the trailing window
    Daily {
        /// Window length in days, at most 366 (default from config)
        #[arg(long)]
        days: Option<u32>,
        /// Last day of the window as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Minutes per tag over all sessions
    Distribution,
    /// Total, count and average session length
    Summary,
    /// Summary, daily series, distribution and colours in one document
    Dashboard,
}

pub fn run(action: StatsAction) -> CommandResult {
    let tracker = open_tracker()?;
    let today = Local::now().date_naive();

    match action {
        StatsAction::Totals => {
            print_json(&totals_by_tag(tracker.log()))?;
        }
        StatsAction::Daily { days, date } => {
            let window = days
                .map(|d| d.clamp(1, MAX_WINDOW_DAYS))
                .unwrap_or_else(|| tracker.config().stats.window_days());
            let series = daily_series(
                tracker.log(),
                date.unwrap_or(today),
                window,
                tracker.tags().tags(),
            );
            print_json(&series)?;
        }
        StatsAction::Distribution => {
            print_json(&tag_distribution(tracker.log()))?;
        }
        StatsAction::Summary => {
            print_json(&Summary::from_log(tracker.log()))?;
        }
        StatsAction::Dashboard => {
            print_json(&tracker.dashboard(today))?;
        }
    }
    Ok(())
}
