//! Accounts: sign-up, log-in, presence status and profile settings.

pub mod auth;
pub mod profile;
pub mod status;
pub mod user;

pub use auth::{is_valid_email, log_in, sign_up, SignUpForm};
pub use profile::{change_password, update_full_name, MIN_PASSWORD_LEN};
pub use status::UserStatus;
pub use user::{User, UserRole};
