//! JSON output formatting for staffdesk.

use serde::Serialize;
use serde_json::json;

use crate::error::StaffdeskError;
use crate::features::messages::{Contact, Message};
use crate::features::projects::Comment;
use crate::features::tracker::WorkSession;

/// Format the history table as JSON
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_history_json(
    current: Option<&WorkSession>,
    sessions: &[WorkSession],
) -> Result<String, StaffdeskError> {
    let output = json!({
        "current": current,
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format contacts as JSON
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_contacts_json(contacts: &[&Contact]) -> Result<String, StaffdeskError> {
    let output = json!({
        "count": contacts.len(),
        "items": contacts
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a conversation thread as JSON
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_thread_json(contact: &Contact, messages: &[Message]) -> Result<String, StaffdeskError> {
    let output = json!({
        "contact": contact,
        "count": messages.len(),
        "items": messages
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the discussion board as JSON
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn format_comments_json(comments: &[Comment]) -> Result<String, StaffdeskError> {
    let output = json!({
        "count": comments.len(),
        "items": comments
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StaffdeskError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StaffdeskError> {
    Ok(serde_json::to_string_pretty(value)?)
}
