//! HTTP client for the Google Places API with placeholder fallback.

use std::time::Duration;

use crate::fallback;
use crate::google::{interpret_autocomplete, interpret_details, AutocompleteResponse, DetailsResponse};
use crate::types::{PlaceDetails, PlaceSummary};

/// Default Places API base URL.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Default upstream request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key; when absent every lookup is served from placeholders.
    pub api_key: Option<String>,
    /// Base URL without trailing slash, e.g. `https://maps.googleapis.com/maps/api/place`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Load places configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                      |
    /// |-----------------------|----------|----------------------------------------------|
    /// | `PLACES_API_KEY`      | no       | -- (placeholder results only)                |
    /// | `PLACES_BASE_URL`     | no       | `https://maps.googleapis.com/maps/api/place` |
    /// | `PLACES_TIMEOUT_SECS` | no       | `10`                                         |
    ///
    /// # Panics
    ///
    /// Panics if `PLACES_TIMEOUT_SECS` is set but not a valid u64.
    pub fn from_env() -> Self {
        let api_key = std::env::var("PLACES_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url = std::env::var("PLACES_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("PLACES_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PLACES_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            timeout_secs,
        }
    }
}

/// Errors from the places lookup. None of these reach API callers; they
/// trigger the placeholder fallback.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// No API key is configured.
    #[error("Places API key is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout, bad body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Places API error ({status}): {body}")]
    Http { status: u16, body: String },

    /// The service answered but reported a failure status in the body.
    #[error("Places API returned status {status}")]
    Status {
        status: String,
        message: Option<String>,
    },
}

/// Client for place search and details lookups.
pub struct PlacesClient {
    client: reqwest::Client,
    config: PlacesConfig,
}

impl PlacesClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Search establishments matching `query`.
    ///
    /// Falls back to [`fallback::search_placeholders`] on any upstream
    /// failure.
    pub async fn search(&self, query: &str) -> Vec<PlaceSummary> {
        match self.try_search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(error = %e, query, "Place search failed, serving placeholders");
                fallback::search_placeholders(query)
            }
        }
    }

    /// Look up one place. `None` means the service does not know the id.
    ///
    /// Falls back to [`fallback::details_placeholder`] on any upstream
    /// failure.
    pub async fn details(&self, place_id: &str) -> Option<PlaceDetails> {
        match self.try_details(place_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(error = %e, place_id, "Place details failed, serving placeholder");
                Some(fallback::details_placeholder())
            }
        }
    }

    /// Search without fallback.
    pub async fn try_search(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/autocomplete/json", self.config.base_url))
            .query(&[("input", query), ("types", "establishment"), ("key", key)])
            .send()
            .await?;

        let body: AutocompleteResponse = Self::parse_response(response).await?;
        interpret_autocomplete(body)
    }

    /// Details lookup without fallback.
    pub async fn try_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/details/json", self.config.base_url))
            .query(&[
                ("place_id", place_id),
                ("fields", "name,formatted_address,url"),
                ("key", key),
            ])
            .send()
            .await?;

        let body: DetailsResponse = Self::parse_response(response).await?;
        interpret_details(body)
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(PlacesError::NotConfigured)
    }

    /// Parse a successful JSON response body, or capture status and body
    /// text of a failed one.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PlacesError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlacesError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
