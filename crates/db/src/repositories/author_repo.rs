//! Repository for the `authors` table.

use async_trait::async_trait;
use modrepo_core::catalog::Author;

use crate::models::catalog::AuthorRow;
use crate::repositories::AuthorRepository;
use crate::{Db, RepoResult};

/// SQL-backed [`AuthorRepository`].
#[derive(Debug, Clone)]
pub struct AuthorRepo {
    db: Db,
}

impl AuthorRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn select_authors(&self, owning: Option<&str>) -> RepoResult<Vec<Author>> {
        let filter = owning
            .map(|table| format!(" WHERE id IN (SELECT author_id FROM {table})"))
            .unwrap_or_default();
        let query = format!(
            "SELECT id, name, link FROM authors{filter} ORDER BY {}",
            self.db.dialect.binary_order("name")
        );
        let rows = sqlx::query_as::<_, AuthorRow>(&query)
            .fetch_all(&self.db.pool)
            .await?;
        Ok(rows.into_iter().map(AuthorRow::into_entity).collect())
    }
}

#[async_trait]
impl AuthorRepository for AuthorRepo {
    async fn select_all_authors(&self) -> RepoResult<Vec<Author>> {
        self.select_authors(None).await
    }

    async fn select_all_car_authors(&self) -> RepoResult<Vec<Author>> {
        self.select_authors(Some("cars")).await
    }

    async fn select_all_track_authors(&self) -> RepoResult<Vec<Author>> {
        self.select_authors(Some("tracks")).await
    }
}
