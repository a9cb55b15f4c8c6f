//! Settings form: profile name and password.

use super::user::User;
use crate::error::StaffdeskError;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Change the display name.
///
/// # Errors
///
/// Returns a validation error if the name is blank.
pub fn update_full_name(user: &mut User, full_name: &str) -> Result<(), StaffdeskError> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(StaffdeskError::validation("full name is required"));
    }
    user.full_name = trimmed.to_string();
    Ok(())
}

/// Replace the password after checking the confirmation and length.
///
/// # Errors
///
/// Returns a validation error if the two entries differ or the password is too short.
pub fn change_password(
    user: &mut User,
    new_password: &str,
    confirm: &str,
) -> Result<(), StaffdeskError> {
    if new_password != confirm {
        return Err(StaffdeskError::validation("Passwords do not match."));
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StaffdeskError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }
    user.password = new_password.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::account::log_in;

    #[test]
    fn test_update_full_name() {
        let mut user = log_in("jdoe", "secret").unwrap();
        update_full_name(&mut user, "  Jane Doe ").unwrap();
        assert_eq!(user.full_name, "Jane Doe");
        assert!(update_full_name(&mut user, "").is_err());
        assert_eq!(user.full_name, "Jane Doe");
    }

    #[test]
    fn test_change_password_mismatch() {
        let mut user = log_in("jdoe", "secret").unwrap();
        let err = change_password(&mut user, "abcdef", "abcdeg").unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match.");
        assert!(user.password_matches("secret"));
    }

    #[test]
    fn test_change_password_too_short() {
        let mut user = log_in("jdoe", "secret").unwrap();
        let err = change_password(&mut user, "abc", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters.");
    }

    #[test]
    fn test_change_password_ok() {
        let mut user = log_in("jdoe", "secret").unwrap();
        change_password(&mut user, "correct horse", "correct horse").unwrap();
        assert!(user.password_matches("correct horse"));
    }
}
