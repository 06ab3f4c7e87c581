//! Route definitions for the `/challenges` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::challenges;
use crate::state::AppState;

/// Routes mounted at `/challenges`.
///
/// ```text
/// GET    /            -> list
/// POST   /evaluate    -> evaluate
/// PUT    /{id}        -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(challenges::list))
        .route("/evaluate", post(challenges::evaluate))
        .route("/{id}", put(challenges::update))
}
