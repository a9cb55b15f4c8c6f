//! Presence status of the logged-in user.

use std::str::FromStr;

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::error::StaffdeskError;

/// Presence status. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// Working.
    Active,
    /// Not working.
    Offline,
    /// Working, do not disturb.
    Busy,
    /// Stepped away.
    Away,
}

impl UserStatus {
    /// All statuses in selector order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Offline, Self::Busy, Self::Away];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Offline => "Offline",
            Self::Busy => "Busy",
            Self::Away => "Away",
        }
    }

    /// Coloured status dot for terminal output.
    #[must_use]
    pub fn badge(&self) -> ColoredString {
        match self {
            Self::Active => "●".green(),
            Self::Offline => "●".bright_black(),
            Self::Busy => "●".red(),
            Self::Away => "●".yellow(),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for UserStatus {
    type Err = StaffdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "a" => Ok(Self::Active),
            "offline" | "off" | "o" => Ok(Self::Offline),
            "busy" | "b" => Ok(Self::Busy),
            "away" | "w" => Ok(Self::Away),
            other => Err(StaffdeskError::validation(format!(
                "unknown status '{other}' (expected active, offline, busy or away)"
            ))),
        }
    }
}
