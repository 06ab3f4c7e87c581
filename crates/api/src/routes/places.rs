use axum::routing::get;
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// Routes mounted at `/places`.
///
/// ```text
/// GET    /search     -> search
/// GET    /details    -> details
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(places::search))
        .route("/details", get(places::details))
}
