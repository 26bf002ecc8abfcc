use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/nation`.
///
/// ```text
/// GET /brand/all  -> list_brand_nations
/// GET /track/all  -> list_track_nations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brand/all", get(catalog::list_brand_nations))
        .route("/track/all", get(catalog::list_track_nations))
}
