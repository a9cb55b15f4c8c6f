//! The clock-in/clock-out state machine.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::info;

use super::history::HistoryLog;
use super::session::WorkSession;
use crate::core::IdSource;

/// Precondition failures for starting or stopping work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start` was called while a session is already open.
    #[error("already clocked in since {}", since.format("%Y-%m-%d %H:%M:%S UTC"))]
    AlreadyOpen {
        /// Start of the session that is still open.
        since: DateTime<Utc>,
    },
    /// `stop` was called with nothing open.
    #[error("not clocked in; nothing to stop")]
    NotOpen,
}

/// Owns the open session (if any) and the history of closed ones.
#[derive(Debug, Default)]
pub struct SessionTracker {
    current: Option<WorkSession>,
    history: HistoryLog,
    ids: IdSource,
}

impl SessionTracker {
    /// Create a tracker with nothing open and empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker whose history holds the demo week: four hours two days
    /// before `now` and eight hours the day before.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut tracker = Self::new();
        for (id, days_ago, hours) in [("1", 2, 4), ("2", 1, 8)] {
            let start = now - Duration::days(days_ago);
            tracker.history.append(WorkSession::closed(
                id.to_string(),
                start,
                start + Duration::hours(hours),
            ));
        }
        tracker
    }

    /// Clock in at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyOpen`] if a session is already open; the
    /// open session is left untouched.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<&WorkSession, SessionError> {
        if let Some(open) = &self.current {
            return Err(SessionError::AlreadyOpen {
                since: open.start_time,
            });
        }

        let session = WorkSession::open(self.ids.next(now), now);
        info!(id = %session.id, date = %session.date, "work session started");
        Ok(&*self.current.insert(session))
    }

    /// Clock out at `now`, moving the open session into history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotOpen`] if nothing is open; history is unchanged.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<&WorkSession, SessionError> {
        let open = self.current.take().ok_or(SessionError::NotOpen)?;
        let closed = open.close(now);
        info!(
            id = %closed.id,
            seconds = closed.duration().map_or(0, |d| d.num_seconds()),
            "work session stopped"
        );
        self.history.append(closed);
        self.history.last().ok_or(SessionError::NotOpen)
    }

    /// The open session, if clocked in.
    #[must_use]
    pub const fn current(&self) -> Option<&WorkSession> {
        self.current.as_ref()
    }

    /// Whether a session is open.
    #[must_use]
    pub const fn is_working(&self) -> bool {
        self.current.is_some()
    }

    /// Live elapsed time of the open session at `now`.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.current.as_ref().map(|s| s.elapsed(now))
    }

    /// Closed sessions.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_start_opens_exactly_one_session() {
        let mut tracker = SessionTracker::new();
        assert!(!tracker.is_working());

        let session = tracker.start(t0()).unwrap();
        assert!(session.is_open());
        assert_eq!(session.start_time, t0());
        assert!(tracker.is_working());
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_double_start_is_rejected() {
        let mut tracker = SessionTracker::new();
        let first_id = tracker.start(t0()).unwrap().id.clone();

        let err = tracker.start(t0() + Duration::minutes(5)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyOpen { since: t0() });

        let current = tracker.current().unwrap();
        assert_eq!(current.id, first_id);
        assert_eq!(current.start_time, t0());
    }

    #[test]
    fn test_stop_without_open_session_leaves_history() {
        let mut tracker = SessionTracker::new();
        assert_eq!(tracker.stop(t0()).unwrap_err(), SessionError::NotOpen);
        assert!(tracker.history().is_empty());

        tracker.start(t0()).unwrap();
        tracker.stop(t0() + Duration::hours(1)).unwrap();
        assert_eq!(tracker.stop(t0() + Duration::hours(2)).unwrap_err(), SessionError::NotOpen);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn test_stop_records_exact_duration() {
        let mut tracker = SessionTracker::new();
        tracker.start(t0()).unwrap();
        let end = t0() + Duration::seconds(4 * 3600 + 61);

        let closed = tracker.stop(end).unwrap();
        assert_eq!(closed.end_time, Some(end));
        assert_eq!(closed.duration(), Some(end - t0()));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_stop_before_start_records_zero() {
        let mut tracker = SessionTracker::new();
        tracker.start(t0()).unwrap();

        let closed = tracker.stop(t0() - Duration::seconds(30)).unwrap();
        assert_eq!(closed.end_time, Some(t0()));
        assert_eq!(closed.duration(), Some(Duration::zero()));
        assert_eq!(closed.display_duration(), "00:00:00");
        assert_eq!(tracker.history().total(), Duration::zero());
    }

    #[test]
    fn test_stop_then_start_grows_history() {
        let mut tracker = SessionTracker::new();
        tracker.start(t0()).unwrap();
        let stop_at = t0() + Duration::hours(2);
        let closed_id = tracker.stop(stop_at).unwrap().id.clone();
        let before = tracker.history().len();

        // Same instant as the stop: the id must still be fresh.
        let reopened = tracker.start(stop_at).unwrap();
        assert!(reopened.start_time > t0());
        assert_ne!(reopened.id, closed_id);
        assert_eq!(tracker.history().len(), before);
        assert_eq!(before, 1);
    }

    #[test]
    fn test_seeded_history() {
        let tracker = SessionTracker::seeded(t0());
        assert!(!tracker.is_working());

        let days: Vec<_> = tracker.history().recent_first().map(|s| s.date).collect();
        assert_eq!(
            days,
            vec![
                (t0() - Duration::days(1)).date_naive(),
                (t0() - Duration::days(2)).date_naive()
            ]
        );
        assert_eq!(tracker.history().total(), Duration::hours(12));
    }

    #[test]
    fn test_elapsed() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.elapsed(t0()).is_none());
        tracker.start(t0()).unwrap();
        assert_eq!(
            tracker.elapsed(t0() + Duration::seconds(90)),
            Some(Duration::seconds(90))
        );
    }
}
