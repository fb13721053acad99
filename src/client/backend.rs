//! HTTP client for the weather search server's own endpoints

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::services::ForecastBackend;
use crate::api::ErrorBody;
use crate::config::ClientConfig;
use crate::models::{Coordinates, FavoriteEntry, FavoriteParams, ForecastResult, HourlyForecast, WeatherQuery};
use crate::{Result, WeatherSearchError};

const DUPLICATE_MESSAGE: &str = "Favorite already exists";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    fn favorites_url(&self) -> String {
        format!("{}/api/favorites", self.base_url)
    }

    fn favorite_query_url(&self, city: &str, state: &str) -> String {
        format!(
            "{}?city={}&state={}",
            self.favorites_url(),
            urlencoding::encode(city),
            urlencoding::encode(state)
        )
    }
}

/// Decode a success body, or rebuild the server's error from its `{error}` body.
/// `favorite` names the pair a favorites call was about.
async fn decode<T: DeserializeOwned>(response: Response, favorite: Option<(&str, &str)>) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());

    Err(match (status, favorite) {
        (StatusCode::NOT_FOUND, Some((city, state))) => WeatherSearchError::not_found(city, state),
        (StatusCode::BAD_REQUEST, Some((city, state))) if message == DUPLICATE_MESSAGE => {
            WeatherSearchError::duplicate(city, state)
        }
        (status, _) if status.is_client_error() => WeatherSearchError::validation(message),
        _ => WeatherSearchError::upstream(message),
    })
}

#[async_trait]
impl ForecastBackend for HttpBackend {
    async fn daily(&self, query: &WeatherQuery) -> Result<ForecastResult> {
        let url = format!(
            "{}/get-weather?lat={}&lon={}&city={}&state={}",
            self.base_url,
            query.coordinates.latitude,
            query.coordinates.longitude,
            urlencoding::encode(&query.city),
            urlencoding::encode(&query.state)
        );
        decode(self.client.get(url).send().await?, None).await
    }

    async fn hourly(&self, coordinates: Coordinates) -> Result<HourlyForecast> {
        let url = format!(
            "{}/hourly-weather-data?lat={}&lon={}",
            self.base_url, coordinates.latitude, coordinates.longitude
        );
        decode(self.client.get(url).send().await?, None).await
    }

    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        decode(self.client.get(self.favorites_url()).send().await?, None).await
    }

    async fn add_favorite(&self, city: &str, state: &str) -> Result<FavoriteEntry> {
        let body = FavoriteParams::new(city, state);
        decode(
            self.client
                .post(self.favorites_url())
                .json(&body)
                .send()
                .await?,
            Some((city, state)),
        )
        .await
    }

    async fn remove_favorite(&self, city: &str, state: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.favorite_query_url(city, state))
            .send()
            .await?;
        let _: serde_json::Value = decode(response, Some((city, state))).await?;
        Ok(())
    }
}
