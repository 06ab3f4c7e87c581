//! Handlers for the `/places` lookup proxy.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use platewise_places::{PlaceDetails, PlaceSummary};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{PlaceDetailsParams, PlaceSearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/places/search?query=
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    params: Result<Query<PlaceSearchParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<PlaceSummary>>>> {
    let Query(params) = params?;
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query is required".into()));
    }

    let hits = state.places.search(query).await;
    Ok(Json(DataResponse::new(hits)))
}

/// GET /api/v1/places/details?place_id=
pub async fn details(
    State(state): State<AppState>,
    _user: AuthUser,
    params: Result<Query<PlaceDetailsParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<PlaceDetails>>> {
    let Query(params) = params?;
    let place_id = params.place_id.trim();
    if place_id.is_empty() {
        return Err(AppError::BadRequest("Place ID is required".into()));
    }

    let details = state
        .places
        .details(place_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Place {place_id} not found")))?;
    Ok(Json(DataResponse::new(details)))
}
