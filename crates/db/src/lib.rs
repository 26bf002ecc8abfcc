//! Persistence layer for the mod catalog.
//!
//! One set of repositories runs on either PostgreSQL or MySQL through the
//! sqlx `Any` driver; [`Dialect`] isolates the SQL the two disagree on.

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

pub mod dialect;
pub mod error;
pub mod models;
pub mod repositories;

pub use dialect::Dialect;
pub use error::{RepoError, RepoResult};

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// A connection pool paired with the dialect of the backend it talks to.
///
/// Cheap to clone; every repository holds its own copy.
#[derive(Debug, Clone)]
pub struct Db {
    pub pool: AnyPool,
    pub dialect: Dialect,
}

impl Db {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }
}

/// Create a connection pool from a database URL.
///
/// The URL scheme (`postgres://`, `mysql://`, ...) selects the dialect.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<Db, sqlx::Error> {
    sqlx::any::install_default_drivers();
    let dialect = Dialect::from_url(database_url)?;

    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::debug!(dialect = dialect.name(), max_connections, "Connection pool ready");
    Ok(Db::new(pool, dialect))
}

/// Verify the store answers a trivial query.
pub async fn health_check(db: &Db) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(&db.pool).await?;
    Ok(())
}

/// Apply the embedded migrations for the pool's backend.
pub async fn run_migrations(db: &Db) -> Result<(), sqlx::migrate::MigrateError> {
    match db.dialect {
        Dialect::Postgres => sqlx::migrate!("../../db/migrations/postgres").run(&db.pool).await,
        Dialect::MySql => sqlx::migrate!("../../db/migrations/mysql").run(&db.pool).await,
    }
}
