use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focuslog_core::input::format_compact;
use focuslog_core::stats::sessions_on_date;
use focuslog_core::RecordedSession;
use serde::Serialize;

use super::{open_tracker, print_json, CommandResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List all recorded sessions
    List {
        /// Only sessions with this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Sessions of one day, in recording order
    Day {
        /// Date as YYYY-MM-DD (default: today)
        date: Option<NaiveDate>,
        /// Restrict to these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Change a session's task label
    Rename { id: u64, label: String },
    /// Delete a session
    Delete { id: u64 },
}

#[derive(Serialize)]
struct SessionRow<'a> {
    #[serde(flatten)]
    session: &'a RecordedSession,
    duration: String,
}

fn rows<'a>(sessions: impl IntoIterator<Item = &'a RecordedSession>) -> Vec<SessionRow<'a>> {
    sessions
        .into_iter()
        .map(|session| SessionRow {
            session,
            duration: format_compact(session.duration_secs),
        })
        .collect()
}

pub fn run(action: SessionAction) -> CommandResult {
    let mut tracker = open_tracker()?;

    match action {
        SessionAction::List { tag } => {
            let sessions = tracker
                .log()
                .sessions()
                .iter()
                .filter(|s| tag.as_deref().map_or(true, |t| s.tag == t));
            print_json(&rows(sessions))?;
        }
        SessionAction::Day { date, tags } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let sessions = sessions_on_date(tracker.log(), date, &tags);
            print_json(&rows(sessions))?;
        }
        SessionAction::Rename { id, label } => {
            if !tracker.rename_session(id, &label) {
                return Err(format!("cannot rename session {id}: unknown id or blank label").into());
            }
            if let Some(session) = tracker.log().get(id) {
                print_json(session)?;
            }
        }
        SessionAction::Delete { id } => {
            let deleted = tracker
                .delete_session(id)
                .ok_or_else(|| format!("no session with id {id}"))?;
            print_json(&deleted)?;
        }
    }
    Ok(())
}
