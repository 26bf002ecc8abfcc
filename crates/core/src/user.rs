//! Catalog user entity and credential DTOs.
//!
//! Passwords only ever travel inward: they appear on [`Credentials`] and
//! [`NewUser`], never on [`User`], and their `Debug` output is redacted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::validate_name;
use crate::error::CoreError;
use crate::roles::Role;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// An authenticated or stored user, safe to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: Role,
}

/// Username/password pair submitted at login.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// DTO for registering a user.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate a registration request.
pub fn validate_new_user(input: &NewUser) -> Result<(), CoreError> {
    validate_name("username", &input.username)?;
    validate_password(&input.password)
}
