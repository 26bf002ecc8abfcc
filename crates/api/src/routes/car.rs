//! Route definitions for the `/car` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Routes mounted at `/car`.
///
/// ```text
/// POST /new                  -> create (admin only)
/// GET  /all                  -> list
/// GET  /nation/{nation}      -> list_by_nation
/// GET  /model/{model}        -> search_by_model
/// GET  /brand/{brand}        -> list_by_brand
/// GET  /category/{category}  -> list_by_category
/// GET  /detail/{model}       -> get_by_model
/// GET  /type/all             -> list_categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(car::create))
        .route("/all", get(car::list))
        .route("/nation/{nation}", get(car::list_by_nation))
        .route("/model/{model}", get(car::search_by_model))
        .route("/brand/{brand}", get(car::list_by_brand))
        .route("/category/{category}", get(car::list_by_category))
        .route("/detail/{model}", get(car::get_by_model))
        .route("/type/all", get(car::list_categories))
}
