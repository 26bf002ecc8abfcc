//! Repository layer.
//!
//! One trait per entity family, each implemented once by a struct holding a
//! [`Db`]. Handlers depend on the traits so tests can swap in fakes.

use async_trait::async_trait;
use modrepo_core::car::{Car, CarBrand, CarCategory};
use modrepo_core::catalog::{Author, Nation};
use modrepo_core::track::{LayoutType, Track, TrackTag};
use modrepo_core::user::{Credentials, NewUser, User};

use crate::{Db, RepoResult};

pub mod author_repo;
pub mod brand_repo;
pub mod car_repo;
mod lookup;
pub mod nation_repo;
pub mod track_repo;
pub mod user_repo;

pub use author_repo::AuthorRepo;
pub use brand_repo::BrandRepo;
pub use car_repo::CarRepo;
pub use nation_repo::NationRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;

/// Car mods and their categories.
///
/// Listings take a `premium` switch: `false` hides premium mods, `true`
/// returns everything. Listings that match nothing fail with `NotFound`.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert a car along with any author, nation, brand or category it
    /// references that does not exist yet.
    async fn insert_car(&self, car: &Car) -> RepoResult<()>;

    async fn select_all_cars(&self, premium: bool) -> RepoResult<Vec<Car>>;

    /// Cars whose brand belongs to `nation`.
    async fn select_cars_by_nation(&self, nation: &str, premium: bool) -> RepoResult<Vec<Car>>;

    /// Case-insensitive substring match on "brand model".
    async fn select_cars_by_model_name(
        &self,
        fragment: &str,
        premium: bool,
    ) -> RepoResult<Vec<Car>>;

    async fn select_cars_by_brand(&self, brand: &str, premium: bool) -> RepoResult<Vec<Car>>;

    async fn select_cars_by_category(&self, category: &str, premium: bool)
        -> RepoResult<Vec<Car>>;

    /// Every known category; empty when none exist yet.
    async fn select_all_car_categories(&self) -> RepoResult<Vec<CarCategory>>;

    /// Exact model name lookup, regardless of premium flag.
    async fn select_car_by_model(&self, model_name: &str) -> RepoResult<Car>;
}

/// Track mods with their layouts and tags.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn insert_track(&self, track: &Track) -> RepoResult<()>;

    /// Overwrite the stored track identified by `track.id`.
    ///
    /// Returns `true` when the stored version differed from the supplied one.
    /// The comparison is advisory; the write happens either way.
    async fn update_track(&self, track: &Track) -> RepoResult<bool>;

    async fn select_all_tracks(&self, premium: bool) -> RepoResult<Vec<Track>>;

    async fn select_tracks_by_nation(&self, nation: &str, premium: bool)
        -> RepoResult<Vec<Track>>;

    /// Tracks with at least one layout of the given type.
    async fn select_tracks_by_layout_type(
        &self,
        layout_type: LayoutType,
        premium: bool,
    ) -> RepoResult<Vec<Track>>;

    /// Case-insensitive substring match on the track name.
    async fn select_tracks_by_name(&self, fragment: &str, premium: bool)
        -> RepoResult<Vec<Track>>;

    async fn select_tracks_by_tag(&self, tag: TrackTag, premium: bool) -> RepoResult<Vec<Track>>;

    /// Exact name lookup, regardless of premium flag.
    async fn select_track_by_name(&self, name: &str) -> RepoResult<Track>;
}

/// Read-only brand listings. Empty results are not errors.
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn select_all_brands(&self) -> RepoResult<Vec<CarBrand>>;
    async fn select_brands_by_nation(&self, nation: &str) -> RepoResult<Vec<CarBrand>>;
    async fn select_brands_by_name(&self, fragment: &str) -> RepoResult<Vec<CarBrand>>;
}

/// Nations referenced by brands and by tracks, as two independent sets.
#[async_trait]
pub trait NationRepository: Send + Sync {
    async fn select_all_brand_nations(&self) -> RepoResult<Vec<Nation>>;
    async fn select_all_track_nations(&self) -> RepoResult<Vec<Nation>>;
}

/// All authors, and the subsets owning at least one car or track.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn select_all_authors(&self) -> RepoResult<Vec<Author>>;
    async fn select_all_car_authors(&self) -> RepoResult<Vec<Author>>;
    async fn select_all_track_authors(&self) -> RepoResult<Vec<Author>>;
}

/// Catalog accounts. Password digests are computed by the store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `InvalidCredentials` for an unknown user and a wrong
    /// password alike.
    async fn login(&self, credentials: &Credentials) -> RepoResult<User>;

    /// Register a user under a freshly generated salt.
    async fn sign_in(&self, input: &NewUser) -> RepoResult<User>;

    /// Replace the salt and digest of an existing user. The caller is
    /// responsible for having authorized the change.
    async fn update_password(&self, username: &str, password: &str) -> RepoResult<()>;
}

/// Store liveness probe used by the health endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> RepoResult<()>;
}

#[async_trait]
impl StoreHealth for Db {
    async fn ping(&self) -> RepoResult<()> {
        crate::health_check(self).await?;
        Ok(())
    }
}
