//! Repository for the `nations` table.

use async_trait::async_trait;
use modrepo_core::catalog::Nation;

use crate::models::catalog::NationRow;
use crate::repositories::NationRepository;
use crate::{Db, RepoResult};

/// SQL-backed [`NationRepository`].
#[derive(Debug, Clone)]
pub struct NationRepo {
    db: Db,
}

impl NationRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Nations whose id appears in `referenced_by`, a single-column subquery.
    async fn select_referenced(&self, referenced_by: &str) -> RepoResult<Vec<Nation>> {
        let query = format!(
            "SELECT id, name, code FROM nations WHERE id IN ({referenced_by}) ORDER BY {}",
            self.db.dialect.binary_order("name")
        );
        let rows = sqlx::query_as::<_, NationRow>(&query)
            .fetch_all(&self.db.pool)
            .await?;
        Ok(rows.into_iter().map(NationRow::into_entity).collect())
    }
}

#[async_trait]
impl NationRepository for NationRepo {
    async fn select_all_brand_nations(&self) -> RepoResult<Vec<Nation>> {
        self.select_referenced("SELECT nation_id FROM car_brands")
            .await
    }

    async fn select_all_track_nations(&self) -> RepoResult<Vec<Nation>> {
        self.select_referenced("SELECT nation_id FROM tracks").await
    }
}
