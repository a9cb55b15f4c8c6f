//! Event handling for the dashboard.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StaffdeskError;
use crate::features::account::UserStatus;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or stop work.
    ToggleWork,
    /// Change the user's status.
    SetStatus(UserStatus),
    /// Scroll history down.
    Next,
    /// Scroll history up.
    Previous,
    /// Show key help.
    Help,
    /// Any other key.
    Dismiss,
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ' | 's') => Action::ToggleWork,
        KeyCode::Char('a') => Action::SetStatus(UserStatus::Active),
        KeyCode::Char('b') => Action::SetStatus(UserStatus::Busy),
        KeyCode::Char('w') => Action::SetStatus(UserStatus::Away),
        KeyCode::Char('o') => Action::SetStatus(UserStatus::Offline),
        KeyCode::Char('j') | KeyCode::Down => Action::Next,
        KeyCode::Char('k') | KeyCode::Up => Action::Previous,
        KeyCode::Char('?') => Action::Help,
        _ => Action::Dismiss,
    }
}

/// Wait up to `tick` for a key press.
///
/// Returns `None` when the tick elapses with no input, so the caller redraws.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action(tick: Duration) -> Result<Option<Action>, StaffdeskError> {
    if event::poll(tick).map_err(|e| StaffdeskError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| StaffdeskError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(action_for(key)));
            }
        }
    }
    Ok(None)
}
