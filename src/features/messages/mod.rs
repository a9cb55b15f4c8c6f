//! Colleague messaging.
//!
//! A fixed directory of colleagues with an in-memory thread per contact.
//! Messages never leave the process.

pub mod contact;
pub mod inbox;

pub use contact::{default_directory, Contact, Presence};
pub use inbox::{Inbox, Message};
