//! The in-memory user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::UserStatus;

/// Role within the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Administrator.
    Admin,
    /// Regular employee.
    Employee,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Employee => write!(f, "Employee"),
        }
    }
}

/// The logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Contact address, known only for users who signed up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Organisation role.
    pub role: UserRole,
    /// Account creation instant.
    pub member_since: DateTime<Utc>,
    /// Account identifier.
    pub account_id: Uuid,
    /// Current presence.
    pub status: UserStatus,
    #[serde(skip)]
    pub(crate) password: String,
}

impl User {
    /// First word of the full name, for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.username)
    }

    /// Upper-cased first letter of the username, for the avatar.
    #[must_use]
    pub fn initial(&self) -> char {
        self.username
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase())
    }

    /// Check a password against the stored one.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> User {
        User {
            username: "jdoe".to_string(),
            full_name: "John Doe".to_string(),
            email: None,
            role: UserRole::Employee,
            member_since: Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap(),
            account_id: Uuid::nil(),
            status: UserStatus::Active,
            password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_first_name_and_initial() {
        let user = sample();
        assert_eq!(user.first_name(), "John");
        assert_eq!(user.initial(), 'J');
    }

    #[test]
    fn test_first_name_falls_back_to_username() {
        let mut user = sample();
        user.full_name = "   ".to_string();
        assert_eq!(user.first_name(), "jdoe");
    }

    #[test]
    fn test_password_never_serialized() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("hunter22"));
        assert!(!json.contains("password"));
    }
}
