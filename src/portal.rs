//! The in-memory portal.
//!
//! One [`Portal`] holds everything a session of the app can see: the user,
//! the work-session tracker, messages, projects and the assistant. The shell
//! and the dashboard both drive it; nothing outlives the process.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::core::{Clock, SystemClock};
use crate::error::StaffdeskError;
use crate::features::account::{self, SignUpForm, User, UserStatus};
use crate::features::assistant::{Assistant, ChatBackend, Conversation, GeminiClient, Turn};
use crate::features::messages::{default_directory, Contact, Inbox, Message};
use crate::features::projects::{Comment, Project, ProjectFile, Workspace};
use crate::features::tracker::{format_hms, HistoryLog, SessionTracker, WorkSession};

/// Top-level screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Timer, status and history.
    #[default]
    Dashboard,
    /// Colleague chat.
    Messages,
    /// AI assistant.
    Assistant,
    /// Project files and discussion.
    Projects,
    /// Profile and password.
    Settings,
}

impl View {
    /// All views in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Messages,
        Self::Assistant,
        Self::Projects,
        Self::Settings,
    ];

    /// Lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Messages => "messages",
            Self::Assistant => "assistant",
            Self::Projects => "projects",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = StaffdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StaffdeskError::validation(format!(
                    "unknown view '{s}' (expected dashboard, messages, assistant, projects or settings)"
                ))
            })
    }
}

/// What the dashboard shows at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// The logged-in user, if any.
    pub user: Option<User>,
    /// Whether a session is open.
    pub working: bool,
    /// The open session, if any.
    pub current: Option<WorkSession>,
    /// Elapsed time of the open session as `HH:MM:SS`.
    pub elapsed: String,
    /// Size of the history window in days.
    pub window_days: u32,
    /// Closed sessions in the window, most recent first.
    pub sessions: Vec<WorkSession>,
    /// Sum of the listed sessions as `HH:MM:SS`.
    pub total: String,
}

/// All in-memory state of one running app.
pub struct Portal {
    clock: Box<dyn Clock>,
    user: Option<User>,
    tracker: SessionTracker,
    inbox: Inbox,
    workspace: Workspace,
    assistant: Assistant,
    view: View,
    history_window_days: u32,
    approver_email: String,
}

impl Portal {
    /// Build a portal from configuration, the wall clock and the Gemini backend.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let backend = GeminiClient::from_config(&config.assistant);
        Self::new(config, Box::new(SystemClock), Box::new(backend))
    }

    /// Build a portal with explicit time and assistant seams.
    #[must_use]
    pub fn new(config: &Config, clock: Box<dyn Clock>, backend: Box<dyn ChatBackend>) -> Self {
        let now = clock.now();
        Self {
            clock,
            user: None,
            tracker: SessionTracker::seeded(now),
            inbox: Inbox::new(default_directory()),
            workspace: Workspace::seeded(config.projects.upload_limit_chars, now),
            assistant: Assistant::new(backend, &config.assistant.greeting),
            view: View::Dashboard,
            history_window_days: config.tracker.history_window_days,
            approver_email: config.projects.approver_email.clone(),
        }
    }

    /// The portal's current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // Account

    /// Create an account and log into it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank field or malformed email.
    pub fn sign_up(&mut self, form: SignUpForm) -> Result<&User, StaffdeskError> {
        let user = account::sign_up(form, self.now())?;
        Ok(self.enter(user))
    }

    /// Log in and receive the demo profile.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either credential is blank.
    pub fn log_in(&mut self, username: &str, password: &str) -> Result<&User, StaffdeskError> {
        let user = account::log_in(username, password)?;
        Ok(self.enter(user))
    }

    fn enter(&mut self, user: User) -> &User {
        debug!(username = %user.username, "user logged in");
        self.inbox = Inbox::seeded(&user.username, self.clock.now());
        self.view = View::Dashboard;
        self.user.insert(user)
    }

    /// Log out and return to the dashboard. The tracker is left as it is.
    pub fn log_out(&mut self) -> Option<User> {
        self.view = View::Dashboard;
        let user = self.user.take();
        if let Some(u) = &user {
            debug!(username = %u.username, "user logged out");
        }
        user
    }

    /// The logged-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The logged-in user, or `NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when nobody is logged in.
    pub fn require_user(&self) -> Result<&User, StaffdeskError> {
        self.user.as_ref().ok_or(StaffdeskError::NotAuthenticated)
    }

    fn require_user_mut(&mut self) -> Result<&mut User, StaffdeskError> {
        self.user.as_mut().ok_or(StaffdeskError::NotAuthenticated)
    }

    /// Change the user's status.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when nobody is logged in.
    pub fn set_status(&mut self, status: UserStatus) -> Result<(), StaffdeskError> {
        let user = self.require_user_mut()?;
        debug!(from = %user.status, to = %status, "status changed");
        user.status = status;
        Ok(())
    }

    /// Change the user's display name.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` or a validation error for a blank name.
    pub fn update_full_name(&mut self, full_name: &str) -> Result<&User, StaffdeskError> {
        let user = self.require_user_mut()?;
        account::update_full_name(user, full_name)?;
        Ok(&*user)
    }

    /// Change the user's password.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated`, or a validation error if the entries differ
    /// or the password is too short.
    pub fn change_password(&mut self, new_password: &str, confirm: &str) -> Result<(), StaffdeskError> {
        let user = self.require_user_mut()?;
        account::change_password(user, new_password, confirm)
    }

    // Work sessions

    /// Clock in and mark the user active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyOpen` if a session is already open.
    pub fn start_work(&mut self) -> Result<WorkSession, StaffdeskError> {
        let now = self.clock.now();
        let session = self.tracker.start(now)?.clone();
        self.sync_status(UserStatus::Active);
        Ok(session)
    }

    /// Clock out and mark the user offline.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotOpen` if no session is open.
    pub fn stop_work(&mut self) -> Result<WorkSession, StaffdeskError> {
        let now = self.clock.now();
        let session = self.tracker.stop(now)?.clone();
        self.sync_status(UserStatus::Offline);
        Ok(session)
    }

    fn sync_status(&mut self, status: UserStatus) {
        if let Some(user) = &mut self.user {
            debug!(to = %status, "status follows tracker");
            user.status = status;
        }
    }

    /// Start or stop depending on whether a session is open.
    ///
    /// # Errors
    ///
    /// Propagates the error of whichever of start or stop ran.
    pub fn toggle_work(&mut self) -> Result<WorkSession, StaffdeskError> {
        if self.tracker.is_working() {
            self.stop_work()
        } else {
            self.start_work()
        }
    }

    /// Elapsed time of the open session.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.tracker.elapsed(self.clock.now())
    }

    /// The session tracker.
    #[must_use]
    pub const fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Closed sessions, oldest first.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        self.tracker.history()
    }

    /// Snapshot of the dashboard at the current instant.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        let now = self.clock.now();
        let sessions: Vec<WorkSession> = self
            .history()
            .within_days(now.date_naive(), self.history_window_days)
            .cloned()
            .collect();
        let total = sessions
            .iter()
            .filter_map(WorkSession::duration)
            .fold(Duration::zero(), |acc, d| acc + d);

        Dashboard {
            user: self.user.clone(),
            working: self.tracker.is_working(),
            current: self.tracker.current().cloned(),
            elapsed: format_hms(self.elapsed().unwrap_or_else(Duration::zero)),
            window_days: self.history_window_days,
            sessions,
            total: format_hms(total),
        }
    }

    // Navigation

    /// The current view.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Switch to `view`.
    pub fn navigate(&mut self, view: View) {
        debug!(%view, "navigate");
        self.view = view;
    }

    // Messages

    /// Contacts matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when nobody is logged in.
    pub fn contacts(&self, query: Option<&str>) -> Result<Vec<&Contact>, StaffdeskError> {
        self.require_user()?;
        Ok(self.inbox.contacts(query))
    }

    /// A contact and their thread.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` or `NotFound` for an unknown contact.
    pub fn thread(&self, contact_id: &str) -> Result<(&Contact, &[Message]), StaffdeskError> {
        self.require_user()?;
        Ok((self.inbox.contact(contact_id)?, self.inbox.thread(contact_id)?))
    }

    /// Send a message as the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated`, `NotFound` for an unknown contact or a
    /// validation error for blank text.
    pub fn send_message(&mut self, contact_id: &str, text: &str) -> Result<&Message, StaffdeskError> {
        let sender = self.require_user()?.username.clone();
        let now = self.clock.now();
        self.inbox.send(contact_id, &sender, text, now)
    }

    // Projects

    /// The project workspace.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The default project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there are no projects.
    pub fn project(&self) -> Result<&Project, StaffdeskError> {
        self.workspace.default_project()
    }

    /// Create an empty file in the default project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn create_file(&mut self, name: &str) -> Result<&ProjectFile, StaffdeskError> {
        let now = self.clock.now();
        self.workspace.create_file(name, now)
    }

    /// Create a folder in the default project.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn create_folder(&mut self, name: &str) -> Result<&ProjectFile, StaffdeskError> {
        let now = self.clock.now();
        self.workspace.create_folder(name, now)
    }

    /// Upload a file, truncating its content to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub fn upload(&mut self, name: &str, content: &str) -> Result<&ProjectFile, StaffdeskError> {
        let now = self.clock.now();
        self.workspace.upload(name, content, now)
    }

    /// Replace a file's content.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id or a validation error for a folder.
    pub fn save_file(&mut self, file_id: &str, content: &str) -> Result<&ProjectFile, StaffdeskError> {
        self.workspace.save_file(file_id, content)
    }

    /// Post to the discussion board as the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` or a validation error for blank text.
    pub fn post_comment(&mut self, text: &str) -> Result<&Comment, StaffdeskError> {
        let author = self.require_user()?.username.clone();
        let now = self.clock.now();
        self.workspace.post_comment(&author, text, now)
    }

    /// Replace a project wholesale.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no project has that id.
    pub fn update_project(&mut self, project: Project) -> Result<(), StaffdeskError> {
        self.workspace.update_project(project)
    }

    /// `mailto:` link requesting approval of the default project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there are no projects.
    pub fn approval_link(&self) -> Result<String, StaffdeskError> {
        self.workspace.approval_link(&self.approver_email)
    }

    // Assistant

    /// Ask the assistant. Backend failures come back as the fallback reply.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank prompt.
    pub fn ask(&mut self, prompt: &str) -> Result<&Turn, StaffdeskError> {
        self.assistant.ask(prompt)
    }

    /// The assistant conversation so far.
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        self.assistant.conversation()
    }
}

impl fmt::Debug for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Portal")
            .field("user", &self.user)
            .field("tracker", &self.tracker)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
