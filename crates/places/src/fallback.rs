//! Placeholder results served when the places service is unavailable.

use crate::types::{PlaceDetails, PlaceSummary};

/// Suffixes and addresses of the three placeholder search hits.
const PLACEHOLDERS: &[(&str, &str)] = &[
    ("Restaurant", "123 Main St, New York, NY"),
    ("Cafe", "456 Oak Ave, New York, NY"),
    ("Bistro", "789 Pine Rd, New York, NY"),
];

/// Three placeholder hits built around the query text, with place ids
/// `mock-place-1` through `mock-place-3`.
pub fn search_placeholders(query: &str) -> Vec<PlaceSummary> {
    let query = query.trim();
    PLACEHOLDERS
        .iter()
        .enumerate()
        .map(|(i, (suffix, address))| PlaceSummary {
            name: format!("{query} {suffix}"),
            address: (*address).to_string(),
            place_id: format!("mock-place-{}", i + 1),
        })
        .collect()
}

/// Placeholder details returned for any place id.
pub fn details_placeholder() -> PlaceDetails {
    PlaceDetails {
        name: "Mock Restaurant".to_string(),
        address: "123 Mock Street, Mock City".to_string(),
        url: Some("https://maps.google.com/?cid=12345".to_string()),
    }
}
