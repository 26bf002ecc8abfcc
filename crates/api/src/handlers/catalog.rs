//! Handlers for the read-only brand, nation and author listings.
//!
//! Unlike the mod listings these return an empty array when nothing matches.

use axum::extract::{Path, State};
use axum::Json;
use modrepo_core::car::CarBrand;
use modrepo_core::catalog::{Author, Nation};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// GET /brand/all
pub async fn list_brands(State(state): State<AppState>) -> AppResult<Json<Vec<CarBrand>>> {
    Ok(Json(state.brands.select_all_brands().await?))
}

/// GET /brand/name/{name}
pub async fn search_brands(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<CarBrand>>> {
    Ok(Json(state.brands.select_brands_by_name(&name).await?))
}

/// GET /brand/nation/{nation}
pub async fn list_brands_by_nation(
    State(state): State<AppState>,
    Path(nation): Path<String>,
) -> AppResult<Json<Vec<CarBrand>>> {
    Ok(Json(state.brands.select_brands_by_nation(&nation).await?))
}

// ---------------------------------------------------------------------------
// Nations
// ---------------------------------------------------------------------------

/// GET /nation/brand/all
pub async fn list_brand_nations(State(state): State<AppState>) -> AppResult<Json<Vec<Nation>>> {
    Ok(Json(state.nations.select_all_brand_nations().await?))
}

/// GET /nation/track/all
pub async fn list_track_nations(State(state): State<AppState>) -> AppResult<Json<Vec<Nation>>> {
    Ok(Json(state.nations.select_all_track_nations().await?))
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// GET /author/all
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.authors.select_all_authors().await?))
}

/// GET /author/car/all
pub async fn list_car_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.authors.select_all_car_authors().await?))
}

/// GET /author/track/all
pub async fn list_track_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.authors.select_all_track_authors().await?))
}
