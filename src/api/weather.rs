use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::WeatherSearchError;
use crate::models::{
    Coordinates, ForecastResult, HourlyForecast, INVALID_COORDINATES, WeatherQuery,
};

const DAILY_FAILED: &str = "Could not retrieve weather data";
const HOURLY_FAILED: &str = "Could not retrieve hourly weather data";

/// Raw query string; values are validated after extraction so that bad
/// input yields the JSON error body instead of a bare rejection
#[derive(Debug, Default, Deserialize)]
pub(super) struct WeatherParams {
    lat: Option<String>,
    lon: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

/// Unreadable query strings get the same answer as bad coordinates
fn read_params(
    raw: Result<Query<WeatherParams>, QueryRejection>,
    fallback: &'static str,
) -> Result<WeatherParams, ApiError> {
    raw.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected weather query");
        ApiError::new(WeatherSearchError::validation(INVALID_COORDINATES), fallback)
    })
}

impl WeatherParams {
    fn coordinates(&self) -> crate::Result<Coordinates> {
        Coordinates::parse(self.lat.as_deref(), self.lon.as_deref())
    }
}

pub(super) async fn get_weather(
    State(state): State<AppState>,
    raw: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<ForecastResult>, ApiError> {
    let params = read_params(raw, DAILY_FAILED)?;
    let coordinates = params.coordinates().map_err(ApiError::with(DAILY_FAILED))?;
    tracing::info!(location = %coordinates.format_coordinates(), "Daily forecast requested");

    let query = WeatherQuery::new(
        coordinates,
        params.city.unwrap_or_default(),
        params.state.unwrap_or_default(),
    );
    let result = state
        .gateway
        .daily_forecast(query)
        .await
        .map_err(ApiError::with(DAILY_FAILED))?;

    Ok(Json(result))
}

pub(super) async fn get_hourly_weather(
    State(state): State<AppState>,
    raw: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<HourlyForecast>, ApiError> {
    let params = read_params(raw, HOURLY_FAILED)?;
    let coordinates = params.coordinates().map_err(ApiError::with(HOURLY_FAILED))?;
    tracing::info!(location = %coordinates.format_coordinates(), "Hourly forecast requested");

    let forecast = state
        .gateway
        .hourly_forecast(coordinates)
        .await
        .map_err(ApiError::with(HOURLY_FAILED))?;

    Ok(Json(forecast))
}
