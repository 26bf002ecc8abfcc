//! Repository for the `users` table.
//!
//! Plaintext passwords are bound as query parameters and digested by the
//! store together with the per-user salt; see [`Dialect::password_digest`].

use std::sync::Arc;

use async_trait::async_trait;
use modrepo_core::error::CoreError;
use modrepo_core::salt::SaltSource;
use modrepo_core::user::{Credentials, NewUser, User};

use crate::models::user::UserRow;
use crate::repositories::UserRepository;
use crate::{Db, Dialect, RepoResult};

/// SQL-backed [`UserRepository`].
#[derive(Clone)]
pub struct UserRepo {
    db: Db,
    salt: Arc<dyn SaltSource>,
}

impl UserRepo {
    pub fn new(db: Db, salt: Arc<dyn SaltSource>) -> Self {
        Self { db, salt }
    }

    fn dialect(&self) -> Dialect {
        self.db.dialect
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn login(&self, credentials: &Credentials) -> RepoResult<User> {
        let query = format!(
            "SELECT username, role FROM users WHERE username = ? AND password = {}",
            self.dialect().password_digest("?", "salt")
        );
        let row = sqlx::query_as::<_, UserRow>(&self.dialect().sql(&query))
            .bind(&credentials.username)
            .bind(&credentials.password)
            .fetch_optional(&self.db.pool)
            .await?;

        match row {
            Some(row) => Ok(row.into_entity()?),
            None => {
                tracing::debug!(username = %credentials.username, "Login rejected");
                Err(CoreError::InvalidCredentials.into())
            }
        }
    }

    async fn sign_in(&self, input: &NewUser) -> RepoResult<User> {
        let salt = self.salt.generate();
        let query = format!(
            "INSERT INTO users (username, password, salt, role) VALUES (?, {}, ?, ?)",
            self.dialect().password_digest("?", "?")
        );
        sqlx::query(&self.dialect().sql(&query))
            .bind(&input.username)
            .bind(&input.password)
            .bind(&salt)
            .bind(&salt)
            .bind(input.role.as_str())
            .execute(&self.db.pool)
            .await?;

        tracing::debug!(username = %input.username, role = input.role.as_str(), "User created");
        Ok(User {
            username: input.username.clone(),
            role: input.role,
        })
    }

    async fn update_password(&self, username: &str, password: &str) -> RepoResult<()> {
        let salt = self.salt.generate();
        let query = format!(
            "UPDATE users SET salt = ?, password = {} WHERE username = ?",
            self.dialect().password_digest("?", "?")
        );
        let result = sqlx::query(&self.dialect().sql(&query))
            .bind(&salt)
            .bind(password)
            .bind(&salt)
            .bind(username)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("user", username).into());
        }
        Ok(())
    }
}
