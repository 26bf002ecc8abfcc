//! Handlers for the `/user` resource (login, registration, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use modrepo_core::user::{validate_new_user, validate_password, Credentials, NewUser, User};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// Request body for `PUT /user/password`.
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user/login
///
/// Unknown usernames and wrong passwords produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.users.login(&input).await?;

    let access_token = generate_access_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to generate access token: {e}")))?;

    tracing::info!(username = %user.username, role = user.role.as_str(), "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    }))
}

/// POST /user/signin
///
/// Register a new user. Admin only.
pub async fn sign_in(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_new_user(&input)?;
    let user = state.users.sign_in(&input).await?;
    tracing::info!(
        username = %user.username,
        role = user.role.as_str(),
        admin = %admin.username,
        "User registered",
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /user/password
///
/// Change the caller's own password.
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password(&input.password)?;
    state
        .users
        .update_password(&user.username, &input.password)
        .await?;
    tracing::info!(username = %user.username, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
