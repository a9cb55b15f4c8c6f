//! Application state for the dashboard.

use crate::error::StaffdeskError;
use crate::features::account::UserStatus;
use crate::features::tracker::{format_duration, WorkSession};
use crate::portal::{Dashboard, Portal};

/// Application state.
pub struct App<'a> {
    /// The portal being driven.
    portal: &'a mut Portal,
    /// Selected history row.
    pub selected: usize,
    /// Message shown in the bottom bar.
    pub notice: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new app over `portal`.
    pub fn new(portal: &'a mut Portal) -> Self {
        Self {
            portal,
            selected: 0,
            notice: Some("Press ? for help".to_string()),
        }
    }

    /// The dashboard at this instant. Called on every tick.
    #[must_use]
    pub fn snapshot(&self) -> Dashboard {
        self.portal.dashboard()
    }

    /// Rows of the history table: the open session first, then the window.
    #[must_use]
    pub fn rows(dash: &Dashboard) -> Vec<&WorkSession> {
        dash.current.iter().chain(&dash.sessions).collect()
    }

    /// Start or stop work.
    ///
    /// # Errors
    ///
    /// Session errors are turned into a notice; other errors are returned.
    pub fn toggle_work(&mut self) -> Result<(), StaffdeskError> {
        match self.portal.toggle_work() {
            Ok(session) => {
                self.notice = Some(match session.end_time {
                    None => "Clocked in".to_string(),
                    Some(_) => format!(
                        "Clocked out after {}",
                        session.duration().map_or_else(String::new, format_duration)
                    ),
                });
                self.selected = 0;
                Ok(())
            }
            Err(e) if e.is_notice() => {
                self.notice = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Change the user's status.
    ///
    /// # Errors
    ///
    /// Notices (such as nobody being logged in) are shown, not returned.
    pub fn set_status(&mut self, status: UserStatus) -> Result<(), StaffdeskError> {
        match self.portal.set_status(status) {
            Ok(()) => {
                self.notice = Some(format!("Status: {status}"));
                Ok(())
            }
            Err(e) if e.is_notice() => {
                self.notice = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        let len = Self::rows(&self.snapshot()).len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    /// Show the key help.
    pub fn show_help(&mut self) {
        self.notice = Some(
            "space/s:start-stop | a:active b:busy w:away o:offline | j/k:scroll | q:quit"
                .to_string(),
        );
    }

    /// Clear the bottom-bar message.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
