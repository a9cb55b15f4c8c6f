//! Completed-session history.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::session::WorkSession;

/// Append-only log of closed work sessions, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<WorkSession>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a closed session.
    pub(crate) fn append(&mut self, session: WorkSession) {
        debug_assert!(!session.is_open(), "history only holds closed sessions");
        self.entries.push(session);
    }

    /// Number of recorded sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sessions in the order they were recorded.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &WorkSession> {
        self.entries.iter()
    }

    /// Sessions most-recent-first, the order they are displayed in.
    pub fn recent_first(&self) -> impl Iterator<Item = &WorkSession> {
        self.entries.iter().rev()
    }

    /// Most-recent-first sessions whose day falls within `days` days ending at `today`.
    ///
    /// A zero-day window is empty.
    pub fn within_days(
        &self,
        today: NaiveDate,
        days: u32,
    ) -> impl Iterator<Item = &WorkSession> {
        let earliest = today - Duration::days(i64::from(days.saturating_sub(1)));
        self.recent_first()
            .filter(move |s| days > 0 && s.date >= earliest && s.date <= today)
    }

    /// The most recently recorded session.
    #[must_use]
    pub fn last(&self) -> Option<&WorkSession> {
        self.entries.last()
    }

    /// Sum of all recorded durations.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.entries
            .iter()
            .filter_map(WorkSession::duration)
            .fold(Duration::zero(), |acc, d| acc + d)
    }
}
