use serde::{Deserialize, Serialize};

/// A search hit: enough to pre-fill a new entry's restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub name: String,
    pub address: String,
    pub place_id: String,
}

/// Details for a single place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: String,
    pub address: String,
    pub url: Option<String>,
}
