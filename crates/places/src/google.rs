//! Wire types for the Google Places JSON API and their interpretation.
//!
//! Google reports most failures inside a `200 OK` body via the `status`
//! field, so every response is classified here before anything is
//! returned to the caller.

use serde::Deserialize;

use crate::client::PlacesError;
use crate::types::{PlaceDetails, PlaceSummary};

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";
pub const STATUS_INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Body of `GET /autocomplete/json`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    #[serde(default)]
    pub description: String,
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

/// Body of `GET /details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub result: Option<DetailsResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub url: Option<String>,
}

impl From<Prediction> for PlaceSummary {
    fn from(p: Prediction) -> Self {
        match p.structured_formatting {
            Some(fmt) => PlaceSummary {
                name: fmt.main_text,
                address: fmt.secondary_text.unwrap_or_default(),
                place_id: p.place_id,
            },
            None => PlaceSummary {
                name: p.description,
                address: String::new(),
                place_id: p.place_id,
            },
        }
    }
}

/// `OK` maps predictions, `ZERO_RESULTS` is an empty list, anything else
/// (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...) is an upstream failure.
pub fn interpret_autocomplete(
    response: AutocompleteResponse,
) -> Result<Vec<PlaceSummary>, PlacesError> {
    match response.status.as_str() {
        STATUS_OK => Ok(response.predictions.into_iter().map(Into::into).collect()),
        STATUS_ZERO_RESULTS => Ok(Vec::new()),
        _ => Err(PlacesError::Status {
            status: response.status,
            message: response.error_message,
        }),
    }
}

/// `OK` with a result is found; `NOT_FOUND`, `INVALID_REQUEST`,
/// `ZERO_RESULTS`, or a missing result is not found; anything else is an
/// upstream failure.
pub fn interpret_details(response: DetailsResponse) -> Result<Option<PlaceDetails>, PlacesError> {
    match response.status.as_str() {
        STATUS_OK => Ok(response.result.map(|r| PlaceDetails {
            name: r.name.unwrap_or_default(),
            address: r.formatted_address.unwrap_or_default(),
            url: r.url,
        })),
        STATUS_NOT_FOUND | STATUS_INVALID_REQUEST | STATUS_ZERO_RESULTS => Ok(None),
        _ => Err(PlacesError::Status {
            status: response.status,
            message: response.error_message,
        }),
    }
}
