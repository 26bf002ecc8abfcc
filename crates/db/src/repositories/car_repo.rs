//! Repository for the `cars` table and its category associations.

use std::collections::HashMap;

use async_trait::async_trait;
use modrepo_core::car::{Car, CarBrand, CarCategory};
use modrepo_core::catalog::Author;
use modrepo_core::error::CoreError;
use modrepo_core::types::DbId;

use crate::dialect::{like_pattern, placeholders, MAX_IN_LIST};
use crate::models::car::{BrandRow, CarCategoryLinkRow, CarRow, NewCarRow};
use crate::models::catalog::AuthorRow;
use crate::repositories::lookup::{ensure_author, ensure_brand, ensure_category, id_by_key};
use crate::repositories::CarRepository;
use crate::{Db, RepoError, RepoResult};

/// Car columns plus the brand and author names used for filtering and ordering.
const SELECT_CARS: &str = "SELECT c.id, c.model_name, b.name AS brand, a.name AS author,
        c.download_link, c.premium, c.image, c.drivetrain, c.transmission,
        c.year, c.torque, c.top_speed, c.weight, c.bhp
     FROM cars c
     JOIN car_brands b ON b.id = c.brand_id
     JOIN authors a ON a.id = c.author_id";

/// Listing ordering key: "brand model".
const ORDER_KEY: &str = "CONCAT(b.name, ' ', c.model_name)";

/// Which cars a listing query selects.
#[derive(Debug, Clone, Copy)]
enum CarFilter<'a> {
    All,
    Nation(&'a str),
    ModelName(&'a str),
    Brand(&'a str),
    Category(&'a str),
    Model(&'a str),
}

impl CarFilter<'_> {
    fn condition(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Nation(_) => Some("b.nation_id IN (SELECT id FROM nations WHERE name = ?)"),
            Self::ModelName(_) => Some("LOWER(CONCAT(b.name, ' ', c.model_name)) LIKE LOWER(?)"),
            Self::Brand(_) => Some("b.name = ?"),
            Self::Category(_) => Some(
                "c.id IN (SELECT l.car_id FROM car_category_links l
                    JOIN car_categories cc ON cc.id = l.category_id
                    WHERE cc.name = ?)",
            ),
            Self::Model(_) => Some("c.model_name = ?"),
        }
    }

    fn argument(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::ModelName(fragment) => Some(like_pattern(fragment)),
            Self::Nation(v) | Self::Brand(v) | Self::Category(v) | Self::Model(v) => {
                Some((*v).to_string())
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::All => "any".to_string(),
            Self::Nation(v) => format!("nation '{v}'"),
            Self::ModelName(v) => format!("model name containing '{v}'"),
            Self::Brand(v) => format!("brand '{v}'"),
            Self::Category(v) => format!("category '{v}'"),
            Self::Model(v) => format!("model '{v}'"),
        }
    }
}

/// SQL-backed [`CarRepository`].
#[derive(Debug, Clone)]
pub struct CarRepo {
    db: Db,
}

impl CarRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn select_cars(&self, filter: CarFilter<'_>, premium: bool) -> RepoResult<Vec<Car>> {
        let mut conditions: Vec<&str> = filter.condition().into_iter().collect();
        if !premium {
            conditions.push("c.premium = 0");
        }

        let mut query = SELECT_CARS.to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY ");
        query.push_str(&self.db.dialect.binary_order(ORDER_KEY));

        let sql = self.db.dialect.sql(&query);
        let mut q = sqlx::query_as::<_, CarRow>(&sql);
        if let Some(argument) = filter.argument() {
            q = q.bind(argument);
        }
        let rows = q.fetch_all(&self.db.pool).await?;

        if rows.is_empty() {
            return Err(CoreError::not_found("car", filter.describe()).into());
        }
        self.resolve(rows).await
    }

    /// Attach brand nations, author links and categories to listing rows.
    async fn resolve(&self, rows: Vec<CarRow>) -> RepoResult<Vec<Car>> {
        let mut brand_names: Vec<&str> = rows.iter().map(|r| r.brand.as_str()).collect();
        brand_names.sort_unstable();
        brand_names.dedup();
        let mut author_names: Vec<&str> = rows.iter().map(|r| r.author.as_str()).collect();
        author_names.sort_unstable();
        author_names.dedup();
        let car_ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();

        let brands = self.brands_by_name(&brand_names).await?;
        let authors = self.authors_by_name(&author_names).await?;
        let mut categories = self.categories_by_car(&car_ids).await?;

        rows.into_iter()
            .map(|row| -> RepoResult<Car> {
                let brand = brands
                    .get(&row.brand)
                    .cloned()
                    .ok_or_else(|| dangling("brand", &row.brand))?;
                let author = authors
                    .get(&row.author)
                    .cloned()
                    .ok_or_else(|| dangling("author", &row.author))?;
                let cats = categories.remove(&row.id).unwrap_or_default();
                Ok(row.into_entity(brand, author, cats)?)
            })
            .collect()
    }

    async fn brands_by_name(&self, names: &[&str]) -> RepoResult<HashMap<String, CarBrand>> {
        let mut brands = HashMap::with_capacity(names.len());
        for chunk in names.chunks(MAX_IN_LIST) {
            let query = format!(
                "SELECT b.name, n.name AS nation, n.code AS nation_code
                 FROM car_brands b
                 JOIN nations n ON n.id = b.nation_id
                 WHERE b.name IN ({})",
                placeholders(chunk.len())
            );
            let sql = self.db.dialect.sql(&query);
            let mut q = sqlx::query_as::<_, BrandRow>(&sql);
            for name in chunk {
                q = q.bind(*name);
            }
            for row in q.fetch_all(&self.db.pool).await? {
                brands.insert(row.name.clone(), row.into_entity());
            }
        }
        Ok(brands)
    }

    async fn authors_by_name(&self, names: &[&str]) -> RepoResult<HashMap<String, Author>> {
        let mut authors = HashMap::with_capacity(names.len());
        for chunk in names.chunks(MAX_IN_LIST) {
            let query = format!(
                "SELECT id, name, link FROM authors WHERE name IN ({})",
                placeholders(chunk.len())
            );
            let sql = self.db.dialect.sql(&query);
            let mut q = sqlx::query_as::<_, AuthorRow>(&sql);
            for name in chunk {
                q = q.bind(*name);
            }
            for row in q.fetch_all(&self.db.pool).await? {
                authors.insert(row.name.clone(), row.into_entity());
            }
        }
        Ok(authors)
    }

    async fn categories_by_car(
        &self,
        car_ids: &[DbId],
    ) -> RepoResult<HashMap<DbId, Vec<CarCategory>>> {
        let mut by_car: HashMap<DbId, Vec<CarCategory>> = HashMap::new();
        // A car's links all fall in its own chunk, so per-car order holds.
        for chunk in car_ids.chunks(MAX_IN_LIST) {
            let query = format!(
                "SELECT l.car_id, cc.name
                 FROM car_category_links l
                 JOIN car_categories cc ON cc.id = l.category_id
                 WHERE l.car_id IN ({})
                 ORDER BY {}",
                placeholders(chunk.len()),
                self.db.dialect.binary_order("cc.name")
            );
            let sql = self.db.dialect.sql(&query);
            let mut q = sqlx::query_as::<_, CarCategoryLinkRow>(&sql);
            for id in chunk {
                q = q.bind(*id);
            }
            for row in q.fetch_all(&self.db.pool).await? {
                by_car
                    .entry(row.car_id)
                    .or_default()
                    .push(CarCategory::named(row.name));
            }
        }
        Ok(by_car)
    }
}

/// A listing row referenced a brand or author the follow-up lookup did not return.
fn dangling(entity: &str, name: &str) -> RepoError {
    CoreError::Internal(format!("car references missing {entity} '{name}'")).into()
}

#[async_trait]
impl CarRepository for CarRepo {
    async fn insert_car(&self, car: &Car) -> RepoResult<()> {
        let dialect = self.db.dialect;
        let mut tx = self.db.pool.begin().await?;

        let author_id = ensure_author(&mut *tx, dialect, &car.info.author).await?;
        let brand_id = ensure_brand(&mut *tx, dialect, &car.brand).await?;
        let mut category_ids = Vec::with_capacity(car.categories.len());
        for category in &car.categories {
            category_ids.push(ensure_category(&mut *tx, dialect, category).await?);
        }

        let row = NewCarRow::from_entity(car, brand_id, author_id);
        let query = format!(
            "INSERT INTO cars ({}) VALUES ({})",
            NewCarRow::COLUMNS.join(", "),
            placeholders(NewCarRow::COLUMNS.len())
        );
        sqlx::query(&dialect.sql(&query))
            .bind(row.model_name)
            .bind(row.brand_id)
            .bind(row.author_id)
            .bind(row.download_link)
            .bind(row.premium)
            .bind(row.image)
            .bind(row.drivetrain)
            .bind(row.transmission)
            .bind(row.year)
            .bind(row.torque)
            .bind(row.top_speed)
            .bind(row.weight)
            .bind(row.bhp)
            .execute(&mut *tx)
            .await?;
        let car_id = id_by_key(&mut *tx, dialect, "cars", "model_name", &car.model_name).await?;

        let link = dialect.insert_ignore("car_category_links", &["car_id", "category_id"]);
        for category_id in category_ids {
            sqlx::query(&link)
                .bind(car_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!(car_id, model_name = %car.model_name, "Car inserted");
        Ok(())
    }

    async fn select_all_cars(&self, premium: bool) -> RepoResult<Vec<Car>> {
        self.select_cars(CarFilter::All, premium).await
    }

    async fn select_cars_by_nation(&self, nation: &str, premium: bool) -> RepoResult<Vec<Car>> {
        self.select_cars(CarFilter::Nation(nation), premium).await
    }

    async fn select_cars_by_model_name(
        &self,
        fragment: &str,
        premium: bool,
    ) -> RepoResult<Vec<Car>> {
        self.select_cars(CarFilter::ModelName(fragment), premium)
            .await
    }

    async fn select_cars_by_brand(&self, brand: &str, premium: bool) -> RepoResult<Vec<Car>> {
        self.select_cars(CarFilter::Brand(brand), premium).await
    }

    async fn select_cars_by_category(
        &self,
        category: &str,
        premium: bool,
    ) -> RepoResult<Vec<Car>> {
        self.select_cars(CarFilter::Category(category), premium)
            .await
    }

    async fn select_all_car_categories(&self) -> RepoResult<Vec<CarCategory>> {
        let query = format!(
            "SELECT name FROM car_categories ORDER BY {}",
            self.db.dialect.binary_order("name")
        );
        let names = sqlx::query_scalar::<_, String>(&query)
            .fetch_all(&self.db.pool)
            .await?;
        Ok(names.into_iter().map(CarCategory::named).collect())
    }

    async fn select_car_by_model(&self, model_name: &str) -> RepoResult<Car> {
        let mut cars = self
            .select_cars(CarFilter::Model(model_name), true)
            .await?;
        cars.pop()
            .ok_or_else(|| CoreError::not_found("car", format!("model '{model_name}'")).into())
    }
}
