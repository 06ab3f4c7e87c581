//! Places lookup proxy.
//!
//! Wraps the Google Places Autocomplete and Place Details endpoints. Lookup
//! failures never reach callers: [`PlacesClient::search`] and
//! [`PlacesClient::details`] fall back to static placeholder results from
//! [`fallback`] whenever the upstream service is unavailable.

pub mod client;
pub mod fallback;
pub mod google;
pub mod types;

pub use client::{PlacesClient, PlacesConfig, PlacesError};
pub use types::{PlaceDetails, PlaceSummary};
