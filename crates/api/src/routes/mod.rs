pub mod author;
pub mod brand;
pub mod car;
pub mod health;
pub mod nation;
pub mod track;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the catalog route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /car/new                          create (admin only)
/// /car/all                          list
/// /car/nation/{nation}              list by brand nation
/// /car/model/{model}                search "brand model"
/// /car/brand/{brand}                list by brand
/// /car/category/{category}          list by category
/// /car/detail/{model}               single car
/// /car/type/all                     car categories
///
/// /track/new                        create (admin only)
/// /track/update                     update (admin only)
/// /track/all                        list
/// /track/nation/{nation}            list by nation
/// /track/layout/type/{layoutType}   list by layout type
/// /track/name/{name}                search by name
/// /track/tag/{tag}                  list by tag
/// /track/detail/{name}              single track
///
/// /layout/type/all                  layout types
/// /tag/all                          track tags
///
/// /brand/all                        brands
/// /brand/name/{name}                brands by name fragment
/// /brand/nation/{nation}            brands by nation
///
/// /nation/brand/all                 nations referenced by brands
/// /nation/track/all                 nations referenced by tracks
///
/// /author/all                       authors
/// /author/car/all                   authors of cars
/// /author/track/all                 authors of tracks
///
/// /user/login                       login (public)
/// /user/signin                      register (admin only)
/// /user/password                    change own password (requires auth)
/// ```
///
/// Listing routes are public; a valid Bearer token additionally unlocks
/// premium mods.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .nest("/car", car::router())
        .nest("/track", track::router())
        .nest("/brand", brand::router())
        .nest("/nation", nation::router())
        .nest("/author", author::router())
        .nest("/user", user::router())
        .route("/layout/type/all", get(handlers::track::list_layout_types))
        .route("/tag/all", get(handlers::track::list_tags))
}
