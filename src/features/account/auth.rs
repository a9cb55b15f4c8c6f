//! Sign-up and mock log-in.
//!
//! There is no identity provider: sign-up builds a profile from the form and
//! log-in hands back a demo profile for any non-empty credentials.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::status::UserStatus;
use super::user::{User, UserRole};
use crate::error::StaffdeskError;

/// Full name given to profiles created by [`log_in`].
pub const DEMO_FULL_NAME: &str = "User Name";

/// Account id given to profiles created by [`log_in`].
pub const DEMO_ACCOUNT_ID: Uuid = Uuid::from_u128(0x7bb2_6027_0d15_4ce7_91be_bb96_02e6_f715);

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Fields collected by the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    /// Display name.
    pub full_name: String,
    /// Contact address.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Chosen password.
    pub password: String,
}

/// Create a new employee profile from the sign-up form.
///
/// # Errors
///
/// Returns a validation error if any field is blank or the email is malformed.
pub fn sign_up(form: SignUpForm, now: DateTime<Utc>) -> Result<User, StaffdeskError> {
    let full_name = required("full name", &form.full_name)?;
    let email = required("email", &form.email)?;
    let username = required("username", &form.username)?;
    if form.password.is_empty() {
        return Err(StaffdeskError::validation("password is required"));
    }
    if !is_valid_email(&email) {
        return Err(StaffdeskError::validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    Ok(User {
        username,
        full_name,
        email: Some(email),
        role: UserRole::Employee,
        member_since: now,
        account_id: Uuid::new_v4(),
        status: UserStatus::Active,
        password: form.password,
    })
}

/// Log in with any non-empty credentials and receive the demo profile.
///
/// # Errors
///
/// Returns a validation error if the username or password is blank.
pub fn log_in(username: &str, password: &str) -> Result<User, StaffdeskError> {
    let username = required("username", username)?;
    if password.is_empty() {
        return Err(StaffdeskError::validation("password is required"));
    }

    Ok(User {
        username,
        full_name: DEMO_FULL_NAME.to_string(),
        email: None,
        role: UserRole::Employee,
        member_since: demo_member_since(),
        account_id: DEMO_ACCOUNT_ID,
        status: UserStatus::Active,
        password: password.to_string(),
    })
}

/// Basic `local@domain.tld` shape check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

fn required(field: &str, value: &str) -> Result<String, StaffdeskError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StaffdeskError::validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn demo_member_since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password: "engine".to_string(),
        }
    }

    #[test]
    fn test_sign_up_creates_active_employee() {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let user = sign_up(form(), now).unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.role, UserRole::Employee);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.member_since, now);
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_ne!(user.account_id, DEMO_ACCOUNT_ID);
    }

    #[test]
    fn test_sign_up_trims_fields() {
        let mut f = form();
        f.username = "  ada  ".to_string();
        let user = sign_up(f, Utc::now()).unwrap();
        assert_eq!(user.username, "ada");
    }

    #[test]
    fn test_sign_up_rejects_blank_and_bad_email() {
        let mut f = form();
        f.full_name = " ".to_string();
        assert!(matches!(sign_up(f, Utc::now()), Err(StaffdeskError::Validation(_))));

        let mut f = form();
        f.email = "not-an-email".to_string();
        assert!(matches!(sign_up(f, Utc::now()), Err(StaffdeskError::Validation(_))));
    }

    #[test]
    fn test_log_in_returns_demo_profile() {
        let user = log_in("jdoe", "secret").unwrap();
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.full_name, DEMO_FULL_NAME);
        assert_eq!(user.account_id, DEMO_ACCOUNT_ID);
        assert_eq!(user.member_since.to_rfc3339(), "2023-01-01T12:00:00+00:00");
        assert!(user.password_matches("secret"));
    }

    #[test]
    fn test_log_in_requires_credentials() {
        assert!(log_in("", "secret").is_err());
        assert!(log_in("jdoe", "").is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }
}
