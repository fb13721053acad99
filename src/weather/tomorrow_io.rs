//! tomorrow.io v4 timelines client

use std::time::Instant;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::models::Coordinates;
use crate::{Result, WeatherSearchError};

const DAILY_FIELDS: &[&str] = &[
    "temperature",
    "temperatureApparent",
    "temperatureMin",
    "temperatureMax",
    "windSpeed",
    "windDirection",
    "humidity",
    "pressureSeaLevel",
    "uvIndex",
    "weatherCode",
    "precipitationProbability",
    "precipitationType",
    "sunriseTime",
    "sunsetTime",
    "visibility",
    "moonPhase",
    "cloudCover",
];

const HOURLY_FIELDS: &[&str] = &[
    "temperature",
    "humidity",
    "pressureSeaLevel",
    "windSpeed",
    "windDirection",
];

pub struct TomorrowIoClient {
    client: Client,
    api_key: String,
    base_url: String,
    timezone: String,
    units: String,
}

impl TomorrowIoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("weather-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherSearchError::config(format!("Failed to create HTTP client: {e}")))?;

        if config.api_key.is_empty() {
            warn!("No tomorrow.io API key configured; forecast requests will be rejected upstream");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timezone: config.timezone.clone(),
            units: config.units.clone(),
        })
    }

    fn timelines_url(&self, params: &[(&str, String)]) -> anyhow::Result<Url> {
        Url::parse_with_params(&format!("{}/timelines", self.base_url), params)
            .context("Invalid tomorrow.io base URL")
    }

    async fn fetch(&self, mut url: Url) -> anyhow::Result<Value> {
        debug!("tomorrow.io request URL: {}", url);
        let start_time = Instant::now();

        url.query_pairs_mut().append_pair("apikey", &self.api_key);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("tomorrow.io request failed: {}", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("tomorrow.io responded with {status}: {body}");
        }

        let payload: Value = response.json().await.map_err(|e| {
            anyhow!("Failed to parse tomorrow.io response: {}", e.without_url())
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved tomorrow.io timelines in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow tomorrow.io response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(payload)
    }
}

#[async_trait]
impl ForecastProvider for TomorrowIoClient {
    #[tracing::instrument(skip(self), fields(location = %coordinates.format_coordinates()))]
    async fn daily(&self, coordinates: Coordinates) -> anyhow::Result<Value> {
        let url = self.timelines_url(&[
            ("location", coordinates.to_pair()),
            ("fields", DAILY_FIELDS.join(",")),
            ("units", self.units.clone()),
            ("timesteps", "1d".to_string()),
            ("timezone", self.timezone.clone()),
        ])?;
        self.fetch(url).await
    }

    #[tracing::instrument(skip(self), fields(location = %coordinates.format_coordinates()))]
    async fn hourly(&self, coordinates: Coordinates) -> anyhow::Result<Value> {
        let url = self.timelines_url(&[
            ("location", coordinates.to_pair()),
            ("fields", HOURLY_FIELDS.join(",")),
            ("units", self.units.clone()),
            ("timesteps", "1h".to_string()),
            ("startTime", "now".to_string()),
            ("endTime", "nowPlus6d".to_string()),
        ])?;
        self.fetch(url).await
    }
}
