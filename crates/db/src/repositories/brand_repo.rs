//! Repository for the `car_brands` table.

use async_trait::async_trait;
use modrepo_core::car::CarBrand;

use crate::dialect::like_pattern;
use crate::models::car::BrandRow;
use crate::repositories::BrandRepository;
use crate::{Db, RepoResult};

const SELECT_BRANDS: &str = "SELECT b.name, n.name AS nation, n.code AS nation_code
     FROM car_brands b
     JOIN nations n ON n.id = b.nation_id";

/// SQL-backed [`BrandRepository`].
#[derive(Debug, Clone)]
pub struct BrandRepo {
    db: Db,
}

impl BrandRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn select_brands(
        &self,
        condition: Option<&str>,
        argument: Option<String>,
    ) -> RepoResult<Vec<CarBrand>> {
        let query = format!(
            "{SELECT_BRANDS}{} ORDER BY {}",
            condition.map(|c| format!(" WHERE {c}")).unwrap_or_default(),
            self.db.dialect.binary_order("b.name")
        );
        let sql = self.db.dialect.sql(&query);
        let mut q = sqlx::query_as::<_, BrandRow>(&sql);
        if let Some(argument) = argument {
            q = q.bind(argument);
        }
        let rows = q.fetch_all(&self.db.pool).await?;
        Ok(rows.into_iter().map(BrandRow::into_entity).collect())
    }
}

#[async_trait]
impl BrandRepository for BrandRepo {
    async fn select_all_brands(&self) -> RepoResult<Vec<CarBrand>> {
        self.select_brands(None, None).await
    }

    async fn select_brands_by_nation(&self, nation: &str) -> RepoResult<Vec<CarBrand>> {
        self.select_brands(Some("n.name = ?"), Some(nation.to_string()))
            .await
    }

    async fn select_brands_by_name(&self, fragment: &str) -> RepoResult<Vec<CarBrand>> {
        self.select_brands(Some("LOWER(b.name) LIKE LOWER(?)"), Some(like_pattern(fragment)))
            .await
    }
}
