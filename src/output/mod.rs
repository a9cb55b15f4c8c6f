//! Output formatting for staffdesk.
//!
//! This module renders portal state as coloured text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StaffdeskError;
use crate::features::account::User;
use crate::features::assistant::Turn;
use crate::features::messages::{Contact, Message};
use crate::features::projects::{Comment, Project, ProjectFile};
use crate::features::tracker::WorkSession;
use crate::portal::Dashboard;

pub use json::*;
pub use pretty::*;

/// Format the dashboard based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_dashboard(dash: &Dashboard, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_dashboard_pretty(dash)),
        OutputFormat::Json => to_json(dash),
    }
}

/// Format the history table based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_history(
    current: Option<&WorkSession>,
    sessions: &[WorkSession],
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(current, sessions, "History")),
        OutputFormat::Json => format_history_json(current, sessions),
    }
}

/// Format a clock-in or clock-out result based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_session_event(
    session: &WorkSession,
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_event_pretty(session)),
        OutputFormat::Json => to_json(session),
    }
}

/// Format the user profile based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_user(user: &User, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_user_pretty(user)),
        OutputFormat::Json => to_json(user),
    }
}

/// Format contacts based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_contacts(contacts: &[&Contact], format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_contacts_pretty(contacts)),
        OutputFormat::Json => format_contacts_json(contacts),
    }
}

/// Format a thread based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_thread(
    contact: &Contact,
    messages: &[Message],
    format: OutputFormat,
) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_thread_pretty(contact, messages)),
        OutputFormat::Json => format_thread_json(contact, messages),
    }
}

/// Format a sent message based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_message(message: &Message, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_message_pretty(message)),
        OutputFormat::Json => to_json(message),
    }
}

/// Format a project based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_project(project: &Project, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_project_pretty(project)),
        OutputFormat::Json => to_json(project),
    }
}

/// Format a file based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_file(file: &ProjectFile, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_file_pretty(file)),
        OutputFormat::Json => to_json(file),
    }
}

/// Format the discussion board based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_comments(comments: &[Comment], format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_comments_pretty(comments)),
        OutputFormat::Json => format_comments_json(comments),
    }
}

/// Format an assistant turn based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_turn(turn: &Turn, format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_turn_pretty(turn)),
        OutputFormat::Json => to_json(turn),
    }
}

/// Format the assistant conversation based on output format
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_conversation(turns: &[Turn], format: OutputFormat) -> Result<String, StaffdeskError> {
    match format {
        OutputFormat::Pretty => Ok(format_conversation_pretty(turns)),
        OutputFormat::Json => to_json(&turns),
    }
}
