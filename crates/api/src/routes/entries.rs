//! Route definitions for the `/entries` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::entries;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// POST   /          -> create
/// GET    /recent    -> list_recent
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(entries::create))
        .route("/recent", get(entries::list_recent))
        .route("/{id}", get(entries::get_by_id))
}
