//! HTTP surface: weather gateway and favorites endpoints

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::WeatherSearchError;
use crate::store::FavoritesStore;
use crate::weather::WeatherGateway;

mod favorites;
mod weather;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FavoritesStore>,
    pub gateway: WeatherGateway,
}

impl AppState {
    pub fn new(store: Arc<dyn FavoritesStore>, gateway: WeatherGateway) -> Self {
        Self { store, gateway }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get-weather", get(weather::get_weather))
        .route("/hourly-weather-data", get(weather::get_hourly_weather))
        .route(
            "/api/favorites",
            get(favorites::list_favorites)
                .post(favorites::add_favorite)
                .delete(favorites::delete_favorite),
        )
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// JSON error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A handler failure paired with the endpoint's generic server-side message
#[derive(Debug)]
pub struct ApiError {
    error: WeatherSearchError,
    fallback: &'static str,
}

impl ApiError {
    pub fn new(error: WeatherSearchError, fallback: &'static str) -> Self {
        Self { error, fallback }
    }

    /// Adapter for `map_err`
    pub fn with(fallback: &'static str) -> impl Fn(WeatherSearchError) -> Self {
        move |error| Self::new(error, fallback)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let message = if self.error.is_client_error() {
            self.error.user_message()
        } else {
            tracing::error!(error = %self.error, "{}", self.fallback);
            self.fallback.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let err = ApiError::new(
            WeatherSearchError::duplicate("Los Angeles", "CA"),
            "Failed to add favorite",
        );
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Favorite already exists");
    }

    #[tokio::test]
    async fn test_server_errors_use_fallback() {
        let err = ApiError::new(
            WeatherSearchError::persistence("lsm tree poisoned"),
            "Failed to fetch favorites",
        );
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to fetch favorites");
    }
}
