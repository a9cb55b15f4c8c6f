//! Core abstractions for staffdesk.
//!
//! Time and identity sources shared by every feature.

mod clock;
mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::IdSource;

#[cfg(test)]
pub use clock::MockClock;
