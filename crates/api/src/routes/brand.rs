use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/brand`.
///
/// ```text
/// GET /all               -> list_brands
/// GET /name/{name}       -> search_brands
/// GET /nation/{nation}   -> list_brands_by_nation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(catalog::list_brands))
        .route("/name/{name}", get(catalog::search_brands))
        .route("/nation/{nation}", get(catalog::list_brands_by_nation))
}
