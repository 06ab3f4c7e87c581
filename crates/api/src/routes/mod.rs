pub mod challenges;
pub mod entries;
pub mod health;
pub mod places;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /entries                     create (POST)
/// /entries/recent              recent entries for the caller
/// /entries/{id}                single entry
///
/// /challenges                  list (seeds defaults on first call)
/// /challenges/evaluate         re-run evaluation for an entry (POST)
/// /challenges/{id}             set progress (PUT)
///
/// /places/search               places search proxy
/// /places/details              place details proxy
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/entries", entries::router())
        .nest("/challenges", challenges::router())
        .nest("/places", places::router())
}
