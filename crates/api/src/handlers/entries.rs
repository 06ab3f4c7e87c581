//! Handlers for the `/entries` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use platewise_core::challenge::ChallengeUpdate;
use platewise_core::error::CoreError;
use platewise_core::meal::{Entry, NewDish, NewEntry, Restaurant};
use platewise_core::types::DbId;
use platewise_db::repositories::EntryRepo;
use serde::{Deserialize, Serialize};

use crate::engine::challenge_progress;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::RecentEntriesParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /entries`. The owner comes from the token.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub restaurant: Option<Restaurant>,
    #[serde(default)]
    pub dishes: Vec<NewDish>,
}

/// Response payload for `POST /entries`.
#[derive(Debug, Serialize)]
pub struct CreatedEntry {
    pub entry: Entry,
    /// Challenge changes written because of this entry.
    pub challenge_updates: Vec<ChallengeUpdate>,
}

/// POST /api/v1/entries
///
/// Persists the entry, then advances the caller's challenges. Challenge
/// failures are logged and do not fail the request.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedEntry>>)> {
    let Json(body) = payload?;
    let restaurant = body.restaurant.ok_or_else(|| {
        CoreError::Validation("Restaurant and dishes are required".into())
    })?;

    let input = NewEntry {
        user_id: user.user_id,
        restaurant,
        dishes: body.dishes,
    };
    input.validate()?;

    let entry = EntryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = %entry.user_id,
        entry_id = entry.id,
        dishes = entry.dishes.len(),
        "Entry created",
    );

    let challenge_updates = challenge_progress::apply_entry(&state.pool, &entry).await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedEntry {
            entry,
            challenge_updates,
        })),
    ))
}

/// GET /api/v1/entries/recent?limit=
pub async fn list_recent(
    State(state): State<AppState>,
    user: AuthUser,
    params: Result<Query<RecentEntriesParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<Entry>>>> {
    let Query(params) = params?;
    let entries = EntryRepo::list_recent(&state.pool, &user.user_id, params.limit).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let Path(id) = id?;
    let entry = EntryRepo::find_by_id(&state.pool, &user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id,
        }))?;
    Ok(Json(DataResponse::new(entry)))
}
