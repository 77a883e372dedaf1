//! Forward geocoding: turn a free-text place name into coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::http;
use crate::types::{Coordinates, Place, WeatherError};

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<SearchResult> for Place {
    fn from(r: SearchResult) -> Self {
        Place {
            name: r.name,
            country: r.country,
            coordinates: Coordinates::new(r.latitude, r.longitude),
        }
    }
}

/// Client for the place-name search endpoint.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    language: String,
}

impl GeocodingClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url: http::normalize_base_url(base_url),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Language for returned place names (ISO 639-1).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Resolve `name` to its single best match.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, name: &str) -> Result<Place, WeatherError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body: SearchResponse = http::handle_response(response).await?;

        let place = body
            .results
            .and_then(|results| results.into_iter().next())
            .map(Place::from)
            .ok_or_else(|| WeatherError::PlaceNotFound(name.to_string()))?;

        tracing::info!(
            "Geocoded {:?} to {} ({}, {})",
            name,
            place.display_name(),
            place.coordinates.latitude,
            place.coordinates.longitude
        );
        Ok(place)
    }
}
