//! Work-session tracking.
//!
//! Provides the clock-in/clock-out tracker:
//! - At most one open session at a time
//! - Append-only history of closed sessions
//! - Pure elapsed-time and duration formatting helpers

pub mod history;
pub mod session;
pub mod timer;
#[allow(clippy::module_inception)]
pub mod tracker;

pub use history::HistoryLog;
pub use session::{WorkSession, IN_PROGRESS};
pub use timer::{elapsed, format_duration, format_hms};
pub use tracker::{SessionError, SessionTracker};
