//! Work sessions.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::timer::{elapsed, format_hms};

/// Label shown in place of a duration for a session that is still open.
pub const IN_PROGRESS: &str = "in progress";

/// One clocked-in interval.
///
/// Open while `end_time` is `None`. Once closed it is never modified again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Timestamp-derived identifier.
    pub id: String,
    /// When the user clocked in.
    pub start_time: DateTime<Utc>,
    /// When the user clocked out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// UTC calendar day of `start_time`.
    pub date: NaiveDate,
}

impl WorkSession {
    /// Open a new session at `now`.
    #[must_use]
    pub fn open(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            start_time: now,
            end_time: None,
            date: now.date_naive(),
        }
    }

    /// Build an already-closed session.
    #[must_use]
    pub fn closed(id: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id,
            start_time: start,
            end_time: Some(end.max(start)),
            date: start.date_naive(),
        }
    }

    /// Consume the open session and return it closed at `now`.
    ///
    /// A clock that stepped back before `start_time` closes it at `start_time`.
    #[must_use]
    pub(crate) fn close(self, now: DateTime<Utc>) -> Self {
        Self {
            end_time: Some(now.max(self.start_time)),
            ..self
        }
    }

    /// Whether the session has no end time yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// `end_time - start_time` for a closed session.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end_time
            .map(|end| end.signed_duration_since(self.start_time))
    }

    /// Time on the clock at `now`: the fixed duration once closed, live otherwise.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.duration()
            .unwrap_or_else(|| elapsed(now, self.start_time))
    }

    /// Duration column text: `HH:MM:SS`, or "in progress" while open.
    #[must_use]
    pub fn display_duration(&self) -> String {
        self.duration()
            .map_or_else(|| IN_PROGRESS.to_string(), format_hms)
    }

    /// Clock-in time in the local timezone.
    #[must_use]
    pub fn start_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }

    /// Clock-out time in the local timezone.
    #[must_use]
    pub fn end_local(&self) -> Option<DateTime<Local>> {
        self.end_time.map(|t| t.with_timezone(&Local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, h, m, s).unwrap()
    }

    #[test]
    fn test_open_session() {
        let session = WorkSession::open("1".to_string(), at(9, 0, 0));
        assert!(session.is_open());
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert!(session.duration().is_none());
        assert_eq!(session.display_duration(), IN_PROGRESS);
    }

    #[test]
    fn test_closed_duration_is_exact() {
        let session = WorkSession::open("1".to_string(), at(9, 0, 0)).close(at(17, 30, 15));
        assert!(!session.is_open());
        assert_eq!(
            session.duration(),
            Some(at(17, 30, 15) - at(9, 0, 0))
        );
        assert_eq!(session.display_duration(), "08:30:15");
    }

    #[test]
    fn test_elapsed_freezes_after_close() {
        let session = WorkSession::closed("1".to_string(), at(9, 0, 0), at(10, 0, 0));
        assert_eq!(session.elapsed(at(23, 0, 0)), Duration::hours(1));
    }

    #[test]
    fn test_elapsed_while_open() {
        let session = WorkSession::open("1".to_string(), at(9, 0, 0));
        assert_eq!(session.elapsed(at(9, 0, 42)), Duration::seconds(42));
    }

    #[test]
    fn test_json_omits_missing_end() {
        let session = WorkSession::open("7".to_string(), at(9, 0, 0));
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("end_time").is_none());
        assert_eq!(json["date"], "2024-06-10");
    }
}
