//! Handlers for the `/car` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use modrepo_core::car::{validate_car, Car, CarCategory};
use modrepo_core::error::CoreError;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /car/new
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(car): Json<Car>,
) -> AppResult<StatusCode> {
    validate_car(&car)?;
    state.cars.insert_car(&car).await?;
    tracing::info!(
        model_name = %car.model_name,
        brand = %car.brand.name,
        admin = %admin.username,
        "Car created",
    );
    Ok(StatusCode::CREATED)
}

/// GET /car/all
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state.cars.select_all_cars(caller.premium()).await?;
    Ok(Json(cars))
}

/// GET /car/nation/{nation}
pub async fn list_by_nation(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(nation): Path<String>,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state
        .cars
        .select_cars_by_nation(&nation, caller.premium())
        .await?;
    Ok(Json(cars))
}

/// GET /car/model/{model}
///
/// Case-insensitive substring search over "brand model".
pub async fn search_by_model(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state
        .cars
        .select_cars_by_model_name(&model, caller.premium())
        .await?;
    Ok(Json(cars))
}

/// GET /car/brand/{brand}
pub async fn list_by_brand(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(brand): Path<String>,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state
        .cars
        .select_cars_by_brand(&brand, caller.premium())
        .await?;
    Ok(Json(cars))
}

/// GET /car/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Car>>> {
    let cars = state
        .cars
        .select_cars_by_category(&category, caller.premium())
        .await?;
    Ok(Json(cars))
}

/// GET /car/detail/{model}
///
/// Premium cars are hidden from anonymous callers, as in the listings.
pub async fn get_by_model(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(model): Path<String>,
) -> AppResult<Json<Car>> {
    let car = state.cars.select_car_by_model(&model).await?;
    if car.info.premium && !caller.premium() {
        return Err(CoreError::not_found("car", format!("model '{model}'")).into());
    }
    Ok(Json(car))
}

/// GET /car/type/all
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CarCategory>>> {
    let categories = state.cars.select_all_car_categories().await?;
    Ok(Json(categories))
}
