//! Google Maps geocoding and place autocomplete

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::services::{PlaceLookup, PlaceSuggestion};
use crate::config::GeocodingConfig;
use crate::models::Coordinates;
use crate::{Result, WeatherSearchError};

pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    place_id: String,
    structured_formatting: StructuredFormatting,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: String,
}

/// `OK` and `ZERO_RESULTS` are answers; every other status is a failure
fn check_status(service: &str, status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(WeatherSearchError::upstream(format!(
            "{service} returned {other}: {}",
            error_message.unwrap_or("no detail")
        ))),
    }
}

impl GoogleMapsClient {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse_with_params(&format!("{}/{path}", self.base_url), params)
            .map_err(|e| WeatherSearchError::config(format!("Invalid geocoding base URL: {e}")))?;
        debug!("Google Maps request URL: {}", url);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl PlaceLookup for GoogleMapsClient {
    #[tracing::instrument(skip(self))]
    async fn suggest(&self, input: &str) -> Result<Vec<PlaceSuggestion>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.url(
            "place/autocomplete/json",
            &[
                ("input", input),
                ("types", "(cities)"),
                ("components", "country:us"),
            ],
        )?;
        let response: AutocompleteResponse =
            self.client.get(url).send().await?.error_for_status()?.json().await?;
        check_status(
            "Place autocomplete",
            &response.status,
            response.error_message.as_deref(),
        )?;

        Ok(response
            .predictions
            .into_iter()
            .map(|p| PlaceSuggestion {
                place_id: p.place_id,
                city: p.structured_formatting.main_text,
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        info!("Geocoding address: '{}'", address);
        let start_time = Instant::now();

        let url = self.url("geocode/json", &[("address", address)])?;
        let response: GeocodeResponse =
            self.client.get(url).send().await?.error_for_status()?.json().await?;
        check_status("Geocoding", &response.status, response.error_message.as_deref())?;

        let Some(first) = response.results.into_iter().next() else {
            info!("No geocoding results for '{}'", address);
            return Ok(None);
        };

        let location = first.geometry.location;
        let coordinates = Coordinates::new(Some(location.lat), Some(location.lng))?;
        info!(
            "Geocoded to {} in {:.3}s",
            coordinates.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(Some(coordinates))
    }
}
