use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::session::{RecordedSession, SessionLog};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
/// Longest trailing window a series will cover; larger requests are cut.
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMinutes {
    pub tag: String,
    pub minutes: u64,
}

/// One day of the trailing series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub tags: Vec<TagMinutes>,
    pub total_minutes: u64,
}

impl DailyBucket {
    pub fn minutes_for(&self, tag: &str) -> u64 {
        self.tags
            .iter()
            .find(|t| t.tag == tag)
            .map(|t| t.minutes)
            .unwrap_or(0)
    }
}

/// Total seconds per tag. Tags without sessions are absent.
pub fn totals_by_tag(log: &SessionLog) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for session in log.sessions() {
        *totals.entry(session.tag.clone()).or_insert(0) += session.duration_secs;
    }
    totals
}

/// Per-day minutes for the `window_days` days ending on `reference`,
/// oldest first. Windows longer than [`MAX_WINDOW_DAYS`] are cut to it.
///
/// Every bucket lists each tag in `tags` (0 when unused), followed by any
/// other tag that shows up inside the window, in order of first appearance.
pub fn daily_series(
    log: &SessionLog,
    reference: NaiveDate,
    window_days: u32,
    tags: &[String],
) -> Vec<DailyBucket> {
    let window_days = window_days.min(MAX_WINDOW_DAYS);
    if window_days == 0 {
        return Vec::new();
    }
    let Some(first_day) = reference.checked_sub_days(Days::new(u64::from(window_days - 1))) else {
        return Vec::new();
    };

    let in_window: Vec<&RecordedSession> = log
        .sessions()
        .iter()
        .filter(|s| s.date >= first_day && s.date <= reference)
        .collect();

    let mut columns: Vec<&str> = tags.iter().map(String::as_str).collect();
    for session in &in_window {
        if !columns.contains(&session.tag.as_str()) {
            columns.push(&session.tag);
        }
    }

    first_day
        .iter_days()
        .take(window_days as usize)
        .map(|date| {
            let mut secs_by_tag: HashMap<&str, u64> = HashMap::new();
            let mut total_secs = 0;
            for session in in_window.iter().filter(|s| s.date == date) {
                *secs_by_tag.entry(&session.tag).or_insert(0) += session.duration_secs;
                total_secs += session.duration_secs;
            }
            DailyBucket {
                date,
                tags: columns
                    .iter()
                    .map(|tag| TagMinutes {
                        tag: tag.to_string(),
                        minutes: secs_by_tag.get(tag).copied().unwrap_or(0) / 60,
                    })
                    .collect(),
                total_minutes: total_secs / 60,
            }
        })
        .collect()
}

/// Whole minutes per tag over the entire log, in order of first appearance.
/// Tags that floor to 0 minutes are left out.
pub fn tag_distribution(log: &SessionLog) -> Vec<TagMinutes> {
    let mut order: Vec<&str> = Vec::new();
    let mut secs: HashMap<&str, u64> = HashMap::new();
    for session in log.sessions() {
        let entry = secs.entry(&session.tag).or_insert_with(|| {
            order.push(&session.tag);
            0
        });
        *entry += session.duration_secs;
    }
    order
        .into_iter()
        .map(|tag| TagMinutes {
            tag: tag.to_string(),
            minutes: secs[tag] / 60,
        })
        .filter(|t| t.minutes > 0)
        .collect()
}

/// Sessions recorded on `date`, ordered by recording time. A non-empty
/// `tag_filter` keeps only sessions carrying one of its tags.
pub fn sessions_on_date<'a>(
    log: &'a SessionLog,
    date: NaiveDate,
    tag_filter: &[String],
) -> Vec<&'a RecordedSession> {
    let mut sessions: Vec<&RecordedSession> = log
        .sessions()
        .iter()
        .filter(|s| s.date == date)
        .filter(|s| tag_filter.is_empty() || tag_filter.contains(&s.tag))
        .collect();
    sessions.sort_by_key(|s| s.recorded_at);
    sessions
}
