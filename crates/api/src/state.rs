use std::sync::Arc;

use platewise_places::PlacesClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing user-specific lives here; the caller's identity arrives per
/// request through [`crate::middleware::auth::AuthUser`].
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: platewise_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Places lookup proxy.
    pub places: Arc<PlacesClient>,
}
