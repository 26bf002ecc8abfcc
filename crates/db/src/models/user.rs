//! User rows. The digest and salt columns are never selected.

use modrepo_core::error::CoreError;
use modrepo_core::roles::Role;
use modrepo_core::user::User;
use sqlx::FromRow;

use super::stored;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub username: String,
    pub role: String,
}

impl UserRow {
    pub fn into_entity(self) -> Result<User, CoreError> {
        Ok(User {
            role: stored("role", Role::from_str(&self.role))?,
            username: self.username,
        })
    }
}
