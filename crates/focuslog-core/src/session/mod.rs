//! Recorded sessions, the session log, and the tag set.

mod log;
mod record;
mod recorder;
mod tags;

pub use log::SessionLog;
pub use record::RecordedSession;
pub use recorder::record_completed_session;
pub use tags::{TagSet, DEFAULT_TAG, TAG_COLORS};
