#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use modrepo_api::auth::jwt::{generate_access_token, JwtConfig};
use modrepo_api::config::ServerConfig;
use modrepo_api::router::build_app_router;
use modrepo_api::state::AppState;
use modrepo_core::car::{Car, CarBrand, CarCategory, Drivetrain, Transmission};
use modrepo_core::catalog::{Author, ModInfo, Nation};
use modrepo_core::error::CoreError;
use modrepo_core::roles::Role;
use modrepo_core::track::{Layout, LayoutType, Track, TrackTag};
use modrepo_core::user::{Credentials, NewUser, User};
use modrepo_db::repositories::{
    AuthorRepository, BrandRepository, CarRepository, NationRepository, StoreHealth,
    TrackRepository, UserRepository,
};
use modrepo_db::{RepoError, RepoResult};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-for-catalog-api-tests";

// ---------------------------------------------------------------------------
// Config and app
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the production router on top of the given in-memory store.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        cars: store.clone(),
        tracks: store.clone(),
        brands: store.clone(),
        nations: store.clone(),
        authors: store.clone(),
        users: store.clone(),
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn token_for(username: &str, role: Role) -> String {
    let user = User {
        username: username.to_string(),
        role,
    };
    generate_access_token(&user, &test_config().jwt).unwrap()
}

pub fn admin_token() -> String {
    token_for("admin", Role::Admin)
}

pub fn standard_token() -> String {
    token_for("driver", Role::Standard)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, Some(token))).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body, None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body, Some(token))).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn car(model: &str, brand: &str, nation: &str, premium: bool) -> Car {
    Car {
        info: ModInfo {
            download_link: format!("https://mods.example/{model}.zip"),
            premium,
            image: String::new(),
            author: Author {
                name: "Kunos".into(),
                link: "https://kunos.example".into(),
            },
        },
        model_name: model.into(),
        brand: CarBrand {
            name: brand.into(),
            nation: Nation::named(nation),
        },
        categories: vec![CarCategory::named("GT3")],
        drivetrain: Drivetrain::Rwd,
        transmission: Transmission::Sequential,
        year: 2019,
        torque: 500,
        top_speed: 290,
        weight: 1250,
        bhp: 550,
    }
}

pub fn track(name: &str, nation: &str, premium: bool) -> Track {
    Track {
        id: None,
        info: ModInfo {
            download_link: format!("https://mods.example/{name}.zip"),
            premium,
            image: String::new(),
            author: Author {
                name: "Reboot Team".into(),
                link: "https://reboot.example".into(),
            },
        },
        name: name.into(),
        nation: Nation::named(nation),
        location: String::new(),
        year: 1950,
        layouts: vec![Layout {
            name: "GP".into(),
            length_m: 5000,
            category: LayoutType::RoadCourse,
        }],
        tags: vec![TrackTag::F1],
        version: 1,
        created_at: None,
        updated_at: None,
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Unique-key violation as a driver would report it.
#[derive(Debug)]
pub struct DuplicateKey(pub &'static str);

impl std::fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate key value violates unique constraint \"{}\"", self.0)
    }
}

impl std::error::Error for DuplicateKey {}

impl sqlx::error::DatabaseError for DuplicateKey {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.0)
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::UniqueViolation
    }
}

fn duplicate(constraint: &'static str) -> RepoError {
    RepoError::Database(sqlx::Error::Database(Box::new(DuplicateKey(constraint))))
}

fn non_empty<T>(rows: Vec<T>, entity: &'static str, key: String) -> RepoResult<Vec<T>> {
    if rows.is_empty() {
        return Err(CoreError::not_found(entity, key).into());
    }
    Ok(rows)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
struct Catalog {
    cars: Vec<Car>,
    tracks: Vec<Track>,
    /// username -> (password, role)
    users: HashMap<String, (String, Role)>,
    next_track_id: i64,
}

/// Repository fake backing every trait the router needs.
#[derive(Default)]
pub struct InMemoryStore {
    catalog: Mutex<Catalog>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail as if the pool were exhausted.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn seed_car(&self, car: Car) {
        self.catalog.lock().unwrap().cars.push(car);
    }

    /// Insert a track and return its assigned id.
    pub fn seed_track(&self, mut track: Track) -> i64 {
        let mut catalog = self.catalog.lock().unwrap();
        catalog.next_track_id += 1;
        let id = catalog.next_track_id;
        track.id = Some(id);
        catalog.tracks.push(track);
        id
    }

    pub fn seed_user(&self, username: &str, password: &str, role: Role) {
        self.catalog
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), (password.to_string(), role));
    }

    pub fn stored_password(&self, username: &str) -> Option<String> {
        self.catalog
            .lock()
            .unwrap()
            .users
            .get(username)
            .map(|(password, _)| password.clone())
    }

    pub fn track(&self, id: i64) -> Option<Track> {
        self.catalog
            .lock()
            .unwrap()
            .tracks
            .iter()
            .find(|t| t.id == Some(id))
            .cloned()
    }

    pub fn car_count(&self) -> usize {
        self.catalog.lock().unwrap().cars.len()
    }

    fn check(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn cars_where(&self, premium: bool, keep: impl Fn(&Car) -> bool) -> Vec<Car> {
        let catalog = self.catalog.lock().unwrap();
        let mut cars: Vec<Car> = catalog
            .cars
            .iter()
            .filter(|c| premium || !c.info.premium)
            .filter(|c| keep(c))
            .cloned()
            .collect();
        cars.sort_by(|a, b| {
            format!("{} {}", a.brand.name, a.model_name)
                .cmp(&format!("{} {}", b.brand.name, b.model_name))
        });
        cars
    }

    fn tracks_where(&self, premium: bool, keep: impl Fn(&Track) -> bool) -> Vec<Track> {
        let catalog = self.catalog.lock().unwrap();
        let mut tracks: Vec<Track> = catalog
            .tracks
            .iter()
            .filter(|t| premium || !t.info.premium)
            .filter(|t| keep(t))
            .cloned()
            .collect();
        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        tracks
    }

    fn brands(&self) -> Vec<CarBrand> {
        let catalog = self.catalog.lock().unwrap();
        let by_name: BTreeMap<String, CarBrand> = catalog
            .cars
            .iter()
            .map(|c| (c.brand.name.clone(), c.brand.clone()))
            .collect();
        by_name.into_values().collect()
    }

    fn authors_of(&self, cars: bool, tracks: bool) -> Vec<Author> {
        let catalog = self.catalog.lock().unwrap();
        let mut by_name = BTreeMap::new();
        if cars {
            for c in &catalog.cars {
                by_name.insert(c.info.author.name.clone(), c.info.author.clone());
            }
        }
        if tracks {
            for t in &catalog.tracks {
                by_name.insert(t.info.author.name.clone(), t.info.author.clone());
            }
        }
        by_name.into_values().collect()
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn insert_car(&self, car: &Car) -> RepoResult<()> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        if catalog.cars.iter().any(|c| c.model_name == car.model_name) {
            return Err(duplicate("uq_cars_model_name"));
        }
        catalog.cars.push(car.clone());
        Ok(())
    }

    async fn select_all_cars(&self, premium: bool) -> RepoResult<Vec<Car>> {
        self.check()?;
        non_empty(self.cars_where(premium, |_| true), "car", "any".into())
    }

    async fn select_cars_by_nation(&self, nation: &str, premium: bool) -> RepoResult<Vec<Car>> {
        self.check()?;
        let cars = self.cars_where(premium, |c| c.brand.nation.name == nation);
        non_empty(cars, "car", format!("nation '{nation}'"))
    }

    async fn select_cars_by_model_name(
        &self,
        fragment: &str,
        premium: bool,
    ) -> RepoResult<Vec<Car>> {
        self.check()?;
        let cars = self.cars_where(premium, |c| {
            contains_ignore_case(&format!("{} {}", c.brand.name, c.model_name), fragment)
        });
        non_empty(cars, "car", format!("model name '{fragment}'"))
    }

    async fn select_cars_by_brand(&self, brand: &str, premium: bool) -> RepoResult<Vec<Car>> {
        self.check()?;
        let cars = self.cars_where(premium, |c| c.brand.name == brand);
        non_empty(cars, "car", format!("brand '{brand}'"))
    }

    async fn select_cars_by_category(
        &self,
        category: &str,
        premium: bool,
    ) -> RepoResult<Vec<Car>> {
        self.check()?;
        let cars = self.cars_where(premium, |c| c.categories.iter().any(|k| k.name == category));
        non_empty(cars, "car", format!("category '{category}'"))
    }

    async fn select_all_car_categories(&self) -> RepoResult<Vec<CarCategory>> {
        self.check()?;
        let catalog = self.catalog.lock().unwrap();
        let mut names: Vec<String> = catalog
            .cars
            .iter()
            .flat_map(|c| c.categories.iter().map(|k| k.name.clone()))
            .collect();
        names.sort();
        names.dedup();
        Ok(names.into_iter().map(CarCategory::named).collect())
    }

    async fn select_car_by_model(&self, model_name: &str) -> RepoResult<Car> {
        self.check()?;
        self.cars_where(true, |c| c.model_name == model_name)
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("car", format!("model '{model_name}'")).into())
    }
}

#[async_trait]
impl TrackRepository for InMemoryStore {
    async fn insert_track(&self, track: &Track) -> RepoResult<()> {
        self.check()?;
        if self.catalog.lock().unwrap().tracks.iter().any(|t| t.name == track.name) {
            return Err(duplicate("uq_tracks_name"));
        }
        let mut stored = track.clone();
        let now = chrono::Utc::now();
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        self.seed_track(stored);
        Ok(())
    }

    async fn update_track(&self, track: &Track) -> RepoResult<bool> {
        self.check()?;
        let id = track
            .id
            .ok_or_else(|| CoreError::Validation("track id is required for update".into()))?;
        let mut catalog = self.catalog.lock().unwrap();
        let stored = catalog
            .tracks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| CoreError::not_found("track", format!("id {id}")))?;
        let changed = stored.version != track.version;
        let (created_at, updated_at) = (stored.created_at, stored.updated_at);
        *stored = track.clone();
        stored.created_at = created_at;
        stored.updated_at = updated_at;
        Ok(changed)
    }

    async fn select_all_tracks(&self, premium: bool) -> RepoResult<Vec<Track>> {
        self.check()?;
        non_empty(self.tracks_where(premium, |_| true), "track", "any".into())
    }

    async fn select_tracks_by_nation(
        &self,
        nation: &str,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.check()?;
        let tracks = self.tracks_where(premium, |t| t.nation.name == nation);
        non_empty(tracks, "track", format!("nation '{nation}'"))
    }

    async fn select_tracks_by_layout_type(
        &self,
        layout_type: LayoutType,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.check()?;
        let tracks =
            self.tracks_where(premium, |t| t.layouts.iter().any(|l| l.category == layout_type));
        non_empty(tracks, "track", format!("layout type '{}'", layout_type.as_str()))
    }

    async fn select_tracks_by_name(
        &self,
        fragment: &str,
        premium: bool,
    ) -> RepoResult<Vec<Track>> {
        self.check()?;
        let tracks = self.tracks_where(premium, |t| contains_ignore_case(&t.name, fragment));
        non_empty(tracks, "track", format!("name '{fragment}'"))
    }

    async fn select_tracks_by_tag(&self, tag: TrackTag, premium: bool) -> RepoResult<Vec<Track>> {
        self.check()?;
        let tracks = self.tracks_where(premium, |t| t.tags.contains(&tag));
        non_empty(tracks, "track", format!("tag '{}'", tag.as_str()))
    }

    async fn select_track_by_name(&self, name: &str) -> RepoResult<Track> {
        self.check()?;
        self.tracks_where(true, |t| t.name == name)
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("track", format!("name '{name}'")).into())
    }
}

#[async_trait]
impl BrandRepository for InMemoryStore {
    async fn select_all_brands(&self) -> RepoResult<Vec<CarBrand>> {
        self.check()?;
        Ok(self.brands())
    }

    async fn select_brands_by_nation(&self, nation: &str) -> RepoResult<Vec<CarBrand>> {
        self.check()?;
        Ok(self
            .brands()
            .into_iter()
            .filter(|b| b.nation.name == nation)
            .collect())
    }

    async fn select_brands_by_name(&self, fragment: &str) -> RepoResult<Vec<CarBrand>> {
        self.check()?;
        Ok(self
            .brands()
            .into_iter()
            .filter(|b| contains_ignore_case(&b.name, fragment))
            .collect())
    }
}

#[async_trait]
impl NationRepository for InMemoryStore {
    async fn select_all_brand_nations(&self) -> RepoResult<Vec<Nation>> {
        self.check()?;
        let mut nations: Vec<Nation> = self.brands().into_iter().map(|b| b.nation).collect();
        nations.sort_by(|a, b| a.name.cmp(&b.name));
        nations.dedup_by(|a, b| a.name == b.name);
        Ok(nations)
    }

    async fn select_all_track_nations(&self) -> RepoResult<Vec<Nation>> {
        self.check()?;
        let catalog = self.catalog.lock().unwrap();
        let mut nations: Vec<Nation> = catalog.tracks.iter().map(|t| t.nation.clone()).collect();
        nations.sort_by(|a, b| a.name.cmp(&b.name));
        nations.dedup_by(|a, b| a.name == b.name);
        Ok(nations)
    }
}

#[async_trait]
impl AuthorRepository for InMemoryStore {
    async fn select_all_authors(&self) -> RepoResult<Vec<Author>> {
        self.check()?;
        Ok(self.authors_of(true, true))
    }

    async fn select_all_car_authors(&self) -> RepoResult<Vec<Author>> {
        self.check()?;
        Ok(self.authors_of(true, false))
    }

    async fn select_all_track_authors(&self) -> RepoResult<Vec<Author>> {
        self.check()?;
        Ok(self.authors_of(false, true))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn login(&self, credentials: &Credentials) -> RepoResult<User> {
        self.check()?;
        let catalog = self.catalog.lock().unwrap();
        match catalog.users.get(&credentials.username) {
            Some((password, role)) if *password == credentials.password => Ok(User {
                username: credentials.username.clone(),
                role: *role,
            }),
            _ => Err(CoreError::InvalidCredentials.into()),
        }
    }

    async fn sign_in(&self, input: &NewUser) -> RepoResult<User> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        if catalog.users.contains_key(&input.username) {
            return Err(duplicate("uq_users_username"));
        }
        catalog
            .users
            .insert(input.username.clone(), (input.password.clone(), input.role));
        Ok(User {
            username: input.username.clone(),
            role: input.role,
        })
    }

    async fn update_password(&self, username: &str, password: &str) -> RepoResult<()> {
        self.check()?;
        let mut catalog = self.catalog.lock().unwrap();
        let entry = catalog
            .users
            .get_mut(username)
            .ok_or_else(|| CoreError::not_found("user", format!("username '{username}'")))?;
        entry.0 = password.to_string();
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        self.check()
    }
}
