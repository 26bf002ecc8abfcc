//! Well-known user roles.
//!
//! Role names are stored verbatim in `users.role`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STANDARD: &str = "standard";

/// Access level of a catalog user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Standard,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Standard => ROLE_STANDARD,
        }
    }

    /// Parse a stored role name.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_STANDARD => Ok(Self::Standard),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {ROLE_ADMIN}, {ROLE_STANDARD}"
            ))),
        }
    }
}
