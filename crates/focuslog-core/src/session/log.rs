use serde::{Deserialize, Serialize};

use super::RecordedSession;

/// Append-only list of recorded sessions, oldest first.
///
/// Entries can only be renamed, retagged when their tag is removed, or
/// deleted outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    sessions: Vec<RecordedSession>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sessions(sessions: Vec<RecordedSession>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[RecordedSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&RecordedSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// An id derived from `now_ms` that sorts after every existing id.
    pub fn next_id(&self, now_ms: u64) -> u64 {
        let last = self.sessions.iter().map(|s| s.id).max();
        match last {
            Some(last) if last >= now_ms => last + 1,
            _ => now_ms,
        }
    }

    pub(crate) fn push(&mut self, session: RecordedSession) {
        self.sessions.push(session);
    }

    /// Replace the task label of one session. Blank labels are refused.
    pub fn rename(&mut self, id: u64, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.task_label = label.to_string();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u64) -> Option<RecordedSession> {
        let idx = self.sessions.iter().position(|s| s.id == id)?;
        Some(self.sessions.remove(idx))
    }

    /// Move every session tagged `from` to `to`. Returns how many moved.
    pub(crate) fn retag(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for session in self.sessions.iter_mut().filter(|s| s.tag == from) {
            session.tag = to.to_string();
            moved += 1;
        }
        moved
    }
}
