//! Elapsed-time helpers for work sessions.
//!
//! The live timer is never ticked; it is recomputed from the start instant
//! whenever something needs to display it.

use chrono::{DateTime, Duration, Utc};

/// Time elapsed between `start` and `now`, never negative.
#[must_use]
pub fn elapsed(now: DateTime<Utc>, start: DateTime<Utc>) -> Duration {
    let d = now.signed_duration_since(start);
    if d < Duration::zero() {
        Duration::zero()
    } else {
        d
    }
}

/// Format a duration as `HH:MM:SS`. Hours grow past two digits if needed.
#[must_use]
pub fn format_hms(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds().max(0);
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}
