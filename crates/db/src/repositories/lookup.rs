//! Resolve-or-create helpers for the shared reference tables.
//!
//! Each helper upsert-ignores the row by its unique name and then re-reads
//! the surrogate id, so an existing row keeps its original attributes.
//! They run on a caller-owned connection, normally inside a transaction.

use modrepo_core::car::{CarBrand, CarCategory};
use modrepo_core::catalog::{Author, Nation};
use modrepo_core::types::DbId;
use sqlx::AnyConnection;

use crate::Dialect;

/// Look up the id of the row whose unique `column` equals `value`.
pub(crate) async fn id_by_key(
    conn: &mut AnyConnection,
    dialect: Dialect,
    table: &str,
    column: &str,
    value: &str,
) -> Result<DbId, sqlx::Error> {
    let query = format!("SELECT id FROM {table} WHERE {column} = ?");
    sqlx::query_scalar::<_, DbId>(&dialect.sql(&query))
        .bind(value)
        .fetch_one(conn)
        .await
}

pub(crate) async fn ensure_nation(
    conn: &mut AnyConnection,
    dialect: Dialect,
    nation: &Nation,
) -> Result<DbId, sqlx::Error> {
    sqlx::query(&dialect.insert_ignore("nations", &["name", "code"]))
        .bind(&nation.name)
        .bind(nation.code.as_deref())
        .execute(&mut *conn)
        .await?;
    id_by_key(conn, dialect, "nations", "name", &nation.name).await
}

pub(crate) async fn ensure_author(
    conn: &mut AnyConnection,
    dialect: Dialect,
    author: &Author,
) -> Result<DbId, sqlx::Error> {
    sqlx::query(&dialect.insert_ignore("authors", &["name", "link"]))
        .bind(&author.name)
        .bind(&author.link)
        .execute(&mut *conn)
        .await?;
    id_by_key(conn, dialect, "authors", "name", &author.name).await
}

/// Resolve the brand, creating its nation first when needed.
pub(crate) async fn ensure_brand(
    conn: &mut AnyConnection,
    dialect: Dialect,
    brand: &CarBrand,
) -> Result<DbId, sqlx::Error> {
    let nation_id = ensure_nation(&mut *conn, dialect, &brand.nation).await?;
    sqlx::query(&dialect.insert_ignore("car_brands", &["name", "nation_id"]))
        .bind(&brand.name)
        .bind(nation_id)
        .execute(&mut *conn)
        .await?;
    id_by_key(conn, dialect, "car_brands", "name", &brand.name).await
}

pub(crate) async fn ensure_category(
    conn: &mut AnyConnection,
    dialect: Dialect,
    category: &CarCategory,
) -> Result<DbId, sqlx::Error> {
    sqlx::query(&dialect.insert_ignore("car_categories", &["name"]))
        .bind(&category.name)
        .execute(&mut *conn)
        .await?;
    id_by_key(conn, dialect, "car_categories", "name", &category.name).await
}
