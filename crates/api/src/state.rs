use std::sync::Arc;

use modrepo_core::salt::RandomSalt;
use modrepo_db::repositories::{
    AuthorRepo, AuthorRepository, BrandRepo, BrandRepository, CarRepo, CarRepository, NationRepo,
    NationRepository, StoreHealth, TrackRepo, TrackRepository, UserRepo, UserRepository,
};
use modrepo_db::Db;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Repositories sit behind trait objects so tests can run the full router
/// against in-memory implementations. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub cars: Arc<dyn CarRepository>,
    pub tracks: Arc<dyn TrackRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub nations: Arc<dyn NationRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Store liveness probe for `/health`.
    pub store: Arc<dyn StoreHealth>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire every repository to the same connection pool.
    pub fn from_db(db: Db, config: ServerConfig) -> Self {
        Self {
            cars: Arc::new(CarRepo::new(db.clone())),
            tracks: Arc::new(TrackRepo::new(db.clone())),
            brands: Arc::new(BrandRepo::new(db.clone())),
            nations: Arc::new(NationRepo::new(db.clone())),
            authors: Arc::new(AuthorRepo::new(db.clone())),
            users: Arc::new(UserRepo::new(db.clone(), Arc::new(RandomSalt))),
            store: Arc::new(db),
            config: Arc::new(config),
        }
    }
}
