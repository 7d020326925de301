use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{daily_series, sessions_on_date, tag_distribution, DailyBucket, Summary, TagMinutes};
use crate::session::{SessionLog, TagSet};

/// One tag's share of the reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagActivity {
    pub tag: String,
    pub minutes: u64,
    pub sessions: usize,
}

/// Everything a chart layer needs in one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub daily: Vec<DailyBucket>,
    pub distribution: Vec<TagMinutes>,
    /// Every tag in the set, in set order, for the reference day.
    pub today: Vec<TagActivity>,
    pub colors: BTreeMap<String, &'static str>,
}

impl Dashboard {
    pub fn build(log: &SessionLog, tags: &TagSet, today: NaiveDate, window_days: u32) -> Self {
        let daily = daily_series(log, today, window_days, tags.tags());
        let distribution = tag_distribution(log);

        let mut colors: BTreeMap<String, &'static str> = tags
            .tags()
            .iter()
            .map(|t| (t.clone(), tags.color_of(t)))
            .collect();
        for entry in &distribution {
            colors
                .entry(entry.tag.clone())
                .or_insert_with(|| tags.color_of(&entry.tag));
        }

        Self {
            summary: Summary::from_log(log),
            daily,
            distribution,
            today: activity_on(log, tags, today),
            colors,
        }
    }
}

fn activity_on(log: &SessionLog, tags: &TagSet, date: NaiveDate) -> Vec<TagActivity> {
    let sessions = sessions_on_date(log, date, &[]);
    tags.tags()
        .iter()
        .map(|tag| {
            let (secs, count) = sessions
                .iter()
                .filter(|s| &s.tag == tag)
                .fold((0u64, 0usize), |(secs, count), s| (secs + s.duration_secs, count + 1));
            TagActivity {
                tag: tag.clone(),
                minutes: secs / 60,
                sessions: count,
            }
        })
        .collect()
}
