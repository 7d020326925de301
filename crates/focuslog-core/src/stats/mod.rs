//! Statistics over the session log.
//!
//! Everything here is a pure function of the log: totals per tag, the
//! trailing daily series for bar/line charts, the tag distribution for the
//! pie chart, the per-day timeline and the dashboard summary.
//!
//! Minutes are always floored with integer division, independently per
//! bucket. A day's per-tag minutes therefore need not add up to its total.

mod aggregate;
mod dashboard;
mod summary;

pub use aggregate::{
    daily_series, sessions_on_date, tag_distribution, totals_by_tag, DailyBucket, TagMinutes,
    DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
pub use dashboard::{Dashboard, TagActivity};
pub use summary::Summary;
