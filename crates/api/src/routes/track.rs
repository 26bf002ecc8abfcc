//! Route definitions for the `/track` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::track;
use crate::state::AppState;

/// Routes mounted at `/track`.
///
/// ```text
/// POST /new                       -> create (admin only)
/// PUT  /update                    -> update (admin only)
/// GET  /all                       -> list
/// GET  /nation/{nation}           -> list_by_nation
/// GET  /layout/type/{layoutType}  -> list_by_layout_type
/// GET  /name/{name}               -> search_by_name
/// GET  /tag/{tag}                 -> list_by_tag
/// GET  /detail/{name}             -> get_by_name
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(track::create))
        .route("/update", put(track::update))
        .route("/all", get(track::list))
        .route("/nation/{nation}", get(track::list_by_nation))
        .route("/layout/type/{layout_type}", get(track::list_by_layout_type))
        .route("/name/{name}", get(track::search_by_name))
        .route("/tag/{tag}", get(track::list_by_tag))
        .route("/detail/{name}", get(track::get_by_name))
}
