//! Handlers for the `/track`, `/layout` and `/tag` resources.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use modrepo_core::error::CoreError;
use modrepo_core::track::{validate_track, LayoutType, Track, TrackTag};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response body for `PUT /track/update`.
#[derive(Debug, Serialize)]
pub struct UpdateTrackResponse {
    /// Whether the stored version differed from the submitted one.
    pub changed: bool,
}

/// POST /track/new
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(track): Json<Track>,
) -> AppResult<StatusCode> {
    validate_track(&track)?;
    state.tracks.insert_track(&track).await?;
    tracing::info!(name = %track.name, admin = %admin.username, "Track created");
    Ok(StatusCode::CREATED)
}

/// PUT /track/update
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(track): Json<Track>,
) -> AppResult<Json<UpdateTrackResponse>> {
    if track.id.is_none() {
        return Err(CoreError::Validation("track id is required for update".into()).into());
    }
    validate_track(&track)?;
    let changed = state.tracks.update_track(&track).await?;
    tracing::info!(
        track_id = ?track.id,
        version = track.version,
        changed,
        admin = %admin.username,
        "Track updated",
    );
    Ok(Json(UpdateTrackResponse { changed }))
}

/// GET /track/all
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
) -> AppResult<Json<Vec<Track>>> {
    let tracks = state.tracks.select_all_tracks(caller.premium()).await?;
    Ok(Json(tracks))
}

/// GET /track/nation/{nation}
pub async fn list_by_nation(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(nation): Path<String>,
) -> AppResult<Json<Vec<Track>>> {
    let tracks = state
        .tracks
        .select_tracks_by_nation(&nation, caller.premium())
        .await?;
    Ok(Json(tracks))
}

/// GET /track/layout/type/{layoutType}
pub async fn list_by_layout_type(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(layout_type): Path<String>,
) -> AppResult<Json<Vec<Track>>> {
    let layout_type = LayoutType::from_str(&layout_type)?;
    let tracks = state
        .tracks
        .select_tracks_by_layout_type(layout_type, caller.premium())
        .await?;
    Ok(Json(tracks))
}

/// GET /track/name/{name}
///
/// Case-insensitive substring search over track names.
pub async fn search_by_name(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Track>>> {
    let tracks = state
        .tracks
        .select_tracks_by_name(&name, caller.premium())
        .await?;
    Ok(Json(tracks))
}

/// GET /track/tag/{tag}
pub async fn list_by_tag(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(tag): Path<String>,
) -> AppResult<Json<Vec<Track>>> {
    let tag = TrackTag::from_str(&tag)?;
    let tracks = state
        .tracks
        .select_tracks_by_tag(tag, caller.premium())
        .await?;
    Ok(Json(tracks))
}

/// GET /track/detail/{name}
///
/// Premium tracks are hidden from anonymous callers, as in the listings.
pub async fn get_by_name(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<Track>> {
    let track = state.tracks.select_track_by_name(&name).await?;
    if track.info.premium && !caller.premium() {
        return Err(CoreError::not_found("track", format!("name '{name}'")).into());
    }
    Ok(Json(track))
}

/// GET /layout/type/all
pub async fn list_layout_types() -> Json<Vec<LayoutType>> {
    Json(LayoutType::ALL.to_vec())
}

/// GET /tag/all
pub async fn list_tags() -> Json<Vec<TrackTag>> {
    Json(TrackTag::ALL.to_vec())
}
