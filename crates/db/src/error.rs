use modrepo_core::error::CoreError;

/// Failure of a repository call.
///
/// Store failures pass through untouched so the HTTP layer can classify
/// them; domain outcomes such as "not found" arrive as [`CoreError`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RepoResult<T> = Result<T, RepoError>;
