//! Handlers for the `/challenges` resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use platewise_core::challenge::{clamp_progress, Challenge, ChallengeUpdate};
use platewise_core::error::CoreError;
use platewise_core::types::DbId;
use platewise_db::repositories::{ChallengeRepo, EntryRepo};
use serde::Deserialize;

use crate::engine::challenge_progress;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /challenges/evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub entry_id: DbId,
}

/// Request body for `PUT /challenges/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateChallengeRequest {
    pub progress: i32,
}

/// GET /api/v1/challenges
///
/// First call for a user seeds the default challenge set.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Challenge>>>> {
    let challenges = ChallengeRepo::ensure_defaults(&state.pool, &user.user_id).await?;
    Ok(Json(DataResponse::new(challenges)))
}

/// POST /api/v1/challenges/evaluate
///
/// Re-runs evaluation for an already stored entry. Each call counts the
/// entry again against challenges that still match.
pub async fn evaluate(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<Vec<ChallengeUpdate>>>> {
    let Json(body) = payload?;
    let entry = EntryRepo::find_by_id(&state.pool, &user.user_id, body.entry_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id: body.entry_id,
        }))?;

    let updates = challenge_progress::apply_entry(&state.pool, &entry).await;
    Ok(Json(DataResponse::new(updates)))
}

/// PUT /api/v1/challenges/{id}
///
/// Sets progress directly, clamped to `0..=goal`.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateChallengeRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<Challenge>>> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Challenge",
            id,
        })
    };

    let current = ChallengeRepo::find_by_id(&state.pool, &user.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    let update = clamp_progress(current.id, body.progress, current.goal);
    let challenge = ChallengeRepo::update(&state.pool, &user.user_id, &update)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(
        user_id = %user.user_id,
        challenge_id = id,
        progress = challenge.progress,
        completed = challenge.completed,
        "Challenge progress set",
    );
    Ok(Json(DataResponse::new(challenge)))
}
