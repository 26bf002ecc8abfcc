//! Route definitions for the `/user` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST /login     -> login
/// POST /signin    -> sign_in (admin only)
/// PUT  /password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(user::login))
        .route("/signin", post(user::sign_in))
        .route("/password", put(user::change_password))
}
