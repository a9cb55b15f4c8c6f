//! Error types for staffdesk.

use thiserror::Error;

use crate::features::assistant::AssistantError;
use crate::features::tracker::SessionError;

/// Top-level error for every fallible staffdesk operation.
#[derive(Debug, Error)]
pub enum StaffdeskError {
    /// Configuration could not be read, parsed or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A referenced item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("{0}")]
    Validation(String),

    /// The operation needs a logged-in user.
    #[error("no user is logged in; use 'login' or 'signup' first")]
    NotAuthenticated,

    /// Work-session precondition failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The assistant backend failed.
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// Terminal setup or drawing failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl StaffdeskError {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the error is a user-facing notice rather than a failure.
    ///
    /// The shell prints these without the red `error:` prefix.
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Session(_) | Self::NotAuthenticated | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_bare() {
        let err = StaffdeskError::validation("Passwords do not match.");
        assert_eq!(err.to_string(), "Passwords do not match.");
        assert!(err.is_notice());
    }

    #[test]
    fn test_session_error_is_transparent() {
        let err: StaffdeskError = SessionError::NotOpen.into();
        assert_eq!(err.to_string(), SessionError::NotOpen.to_string());
    }

    #[test]
    fn test_config_error_is_not_notice() {
        assert!(!StaffdeskError::Config("bad".to_string()).is_notice());
    }
}
