#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup or filtered listing matched no rows.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Login failed. Deliberately identical for unknown users and wrong passwords.
    #[error("username or password not valid")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by any displayable value.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
