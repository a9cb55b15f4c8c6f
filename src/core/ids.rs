//! Timestamp-derived identifiers.

use std::cell::Cell;

use chrono::{DateTime, Utc};

/// Hands out ids built from the millisecond timestamp of `now`.
///
/// Two ids requested within the same millisecond (or with a clock that went
/// backwards) are bumped past the previous one, so ids stay unique and
/// increasing within one portal.
#[derive(Debug, Default)]
pub struct IdSource {
    last: Cell<i64>,
}

impl IdSource {
    /// Create a fresh id source.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: Cell::new(0) }
    }

    /// Next id for an item created at `now`.
    pub fn next(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis().max(self.last.get() + 1);
        self.last.set(candidate);
        candidate.to_string()
    }
}
