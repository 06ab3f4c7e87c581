//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for the recent-entries listing. Clamped in the repository.
#[derive(Debug, Deserialize)]
pub struct RecentEntriesParams {
    pub limit: Option<i64>,
}

/// `?query=` for place search.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchParams {
    #[serde(default)]
    pub query: String,
}

/// `?place_id=` for place details.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsParams {
    #[serde(default)]
    pub place_id: String,
}
