use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/author`.
///
/// ```text
/// GET /all        -> list_authors
/// GET /car/all    -> list_car_authors
/// GET /track/all  -> list_track_authors
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(catalog::list_authors))
        .route("/car/all", get(catalog::list_car_authors))
        .route("/track/all", get(catalog::list_track_authors))
}
