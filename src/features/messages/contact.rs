//! Colleague directory entries.

use serde::{Deserialize, Serialize};

/// Presence of a colleague as shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Reachable.
    Online,
    /// Reachable but occupied.
    Busy,
    /// Not reachable.
    Offline,
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Busy => write!(f, "busy"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// A colleague the user can message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Directory id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Current presence.
    pub presence: Presence,
}

impl Contact {
    /// Create a contact.
    #[must_use]
    pub fn new(id: &str, name: &str, role: &str, presence: Presence) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            presence,
        }
    }

    /// Case-insensitive match on name or role.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.role.to_lowercase().contains(&needle)
    }
}

/// The built-in colleague directory.
#[must_use]
pub fn default_directory() -> Vec<Contact> {
    vec![
        Contact::new("1", "Sarah Connor", "DevOps Lead", Presence::Online),
        Contact::new("2", "John Reese", "Security", Presence::Busy),
        Contact::new("3", "Harold Finch", "System Architect", Presence::Offline),
    ]
}
