//! Feature implementations for staffdesk.
//!
//! - Accounts, presence status and profile settings
//! - Work-session tracking
//! - Colleague messaging
//! - Project file browser and discussion
//! - AI assistant chat

pub mod account;
pub mod assistant;
pub mod messages;
pub mod projects;
pub mod tracker;
