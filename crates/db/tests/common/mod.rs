//! Shared fixtures for repository integration tests.
//!
//! `#[sqlx::test]` provisions a fresh, migrated PostgreSQL database per test;
//! [`any_db`] reconnects to it through the `Any` driver the repositories use.

#![allow(dead_code)]

use std::sync::Arc;

use modrepo_core::car::{Car, CarBrand, CarCategory, Drivetrain, Transmission};
use modrepo_core::catalog::{Author, ModInfo, Nation};
use modrepo_core::salt::SaltSource;
use modrepo_core::track::{Layout, LayoutType, Track, TrackTag};
use modrepo_db::{Db, Dialect};
use sqlx::any::AnyPoolOptions;
use sqlx::{ConnectOptions, PgPool};

pub async fn any_db(pool: &PgPool) -> Db {
    sqlx::any::install_default_drivers();
    let url = pool.connect_options().to_url_lossy();
    let any = AnyPoolOptions::new()
        .max_connections(4)
        .connect(url.as_str())
        .await
        .expect("Any pool should connect to the test database");
    Db::new(any, Dialect::Postgres)
}

/// Deterministic salt source that hands out a fixed value.
pub struct FixedSalt(pub &'static str);

impl SaltSource for FixedSalt {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

pub fn fixed_salt(salt: &'static str) -> Arc<dyn SaltSource> {
    Arc::new(FixedSalt(salt))
}

pub fn author(name: &str, link: &str) -> Author {
    Author {
        name: name.into(),
        link: link.into(),
    }
}

pub fn mod_info(author: Author, premium: bool) -> ModInfo {
    ModInfo {
        download_link: "https://mods.example/download".into(),
        premium,
        image: String::new(),
        author,
    }
}

pub fn car(model: &str, brand: &str, nation: &str, categories: &[&str]) -> Car {
    Car {
        info: mod_info(author("Kunos", "https://kunos.example"), false),
        model_name: model.into(),
        brand: CarBrand {
            name: brand.into(),
            nation: Nation::named(nation),
        },
        categories: categories.iter().map(|c| CarCategory::named(*c)).collect(),
        drivetrain: Drivetrain::Rwd,
        transmission: Transmission::Manual,
        year: 1988,
        torque: 230,
        top_speed: 235,
        weight: 1200,
        bhp: 195,
    }
}

pub fn track(name: &str, nation: &str, tags: &[TrackTag]) -> Track {
    Track {
        id: None,
        info: mod_info(author("Kunos", "https://kunos.example"), false),
        name: name.into(),
        nation: Nation::named(nation),
        location: String::new(),
        year: 1950,
        layouts: vec![Layout {
            name: "GP".into(),
            length_m: 5000,
            category: LayoutType::RoadCourse,
        }],
        tags: tags.to_vec(),
        version: 1,
        created_at: None,
        updated_at: None,
    }
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"))
}
