//! Weather gateway
//!
//! Validated coordinates go in, provider payloads come out. Every provider
//! failure (transport, status, payload shape) collapses into one
//! `Upstream` error; the detail is only logged.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::WeatherConfig;
use crate::models::{
    Coordinates, DailyValues, ForecastResult, HourlyForecast, HourlyValues, Interval, Timelines,
    WeatherQuery,
};
use crate::{Result, WeatherSearchError};

pub mod tomorrow_io;

pub use tomorrow_io::TomorrowIoClient;

/// A source of timeline forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Raw daily timelines payload for the coordinates
    async fn daily(&self, coordinates: Coordinates) -> anyhow::Result<Value>;

    /// Raw hourly timelines payload for the coordinates
    async fn hourly(&self, coordinates: Coordinates) -> anyhow::Result<Value>;
}

#[derive(Clone)]
pub struct WeatherGateway {
    provider: Arc<dyn ForecastProvider>,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Gateway backed by the tomorrow.io timelines API
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(TomorrowIoClient::new(config)?)))
    }

    /// Daily forecast for a query, echoing the query's location fields
    #[tracing::instrument(skip(self), fields(city = %query.city, state = %query.state))]
    pub async fn daily_forecast(&self, query: WeatherQuery) -> Result<ForecastResult> {
        let payload = self
            .provider
            .daily(query.coordinates)
            .await
            .map_err(|e| collapse("daily", &e))?;

        // Shape check only; the payload is passed through untouched
        if let Err(e) = serde_json::from_value::<Timelines<DailyValues>>(payload.clone()) {
            return Err(collapse("daily", &anyhow::anyhow!("unexpected payload shape: {e}")));
        }

        Ok(ForecastResult::new(query, payload))
    }

    /// Hourly intervals of the provider's first timeline
    #[tracing::instrument(skip(self))]
    pub async fn hourly_forecast(&self, coordinates: Coordinates) -> Result<HourlyForecast> {
        let payload = self
            .provider
            .hourly(coordinates)
            .await
            .map_err(|e| collapse("hourly", &e))?;

        let data = extract_hourly(payload).map_err(|e| collapse("hourly", &e))?;
        Ok(HourlyForecast { data })
    }
}

fn extract_hourly(payload: Value) -> anyhow::Result<Vec<Interval<HourlyValues>>> {
    let timelines: Timelines<HourlyValues> = serde_json::from_value(payload)
        .map_err(|e| anyhow::anyhow!("unexpected payload shape: {e}"))?;
    timelines
        .into_first_intervals()
        .ok_or_else(|| anyhow::anyhow!("payload contains no timelines"))
}

fn collapse(kind: &str, err: &anyhow::Error) -> WeatherSearchError {
    tracing::error!(error = %format!("{err:#}"), "Failed to retrieve {kind} forecast");
    WeatherSearchError::upstream(format!("{kind} forecast unavailable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedProvider {
        daily: Option<Value>,
        hourly: Option<Value>,
    }

    #[async_trait]
    impl ForecastProvider for FixedProvider {
        async fn daily(&self, _coordinates: Coordinates) -> anyhow::Result<Value> {
            self.daily.clone().ok_or_else(|| anyhow::anyhow!("connection refused"))
        }

        async fn hourly(&self, _coordinates: Coordinates) -> anyhow::Result<Value> {
            self.hourly.clone().ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn gateway(daily: Option<Value>, hourly: Option<Value>) -> WeatherGateway {
        WeatherGateway::new(Arc::new(FixedProvider { daily, hourly }))
    }

    fn los_angeles() -> Coordinates {
        Coordinates::new(Some(34.05), Some(-118.24)).unwrap()
    }

    #[tokio::test]
    async fn test_daily_passes_payload_through() {
        let payload = json!({
            "data": { "timelines": [{ "timestep": "1d", "intervals": [] }] },
            "extra": "kept"
        });
        let gateway = gateway(Some(payload.clone()), None);

        let query = WeatherQuery::new(los_angeles(), "Los Angeles", "CA");
        let result = gateway.daily_forecast(query).await.unwrap();

        assert_eq!(result.weather, payload);
        assert_eq!(result.city, "Los Angeles");
    }

    #[tokio::test]
    async fn test_daily_shape_mismatch_is_upstream_error() {
        let gateway = gateway(Some(json!({ "code": 429001, "type": "Too Many Calls" })), None);
        let query = WeatherQuery::new(los_angeles(), "Los Angeles", "CA");

        let err = gateway.daily_forecast(query).await.unwrap_err();
        assert!(matches!(err, WeatherSearchError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_hourly_keeps_first_timeline() {
        let payload = json!({
            "data": { "timelines": [
                { "intervals": [
                    { "startTime": "2026-10-16T00:00:00Z", "values": { "temperature": 61.0 } },
                    { "startTime": "2026-10-16T01:00:00Z", "values": { "temperature": 60.5 } }
                ]},
                { "intervals": [
                    { "startTime": "2026-10-16T00:00:00Z", "values": { "temperature": 99.0 } }
                ]}
            ]}
        });
        let gateway = gateway(None, Some(payload));

        let hourly = gateway.hourly_forecast(los_angeles()).await.unwrap();
        assert_eq!(hourly.data.len(), 2);
        assert_eq!(hourly.data[1].values.temperature, Some(60.5));
    }

    #[tokio::test]
    async fn test_hourly_without_timelines_fails() {
        let gateway = gateway(None, Some(json!({ "data": { "timelines": [] } })));
        let err = gateway.hourly_forecast(los_angeles()).await.unwrap_err();
        assert!(matches!(err, WeatherSearchError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_error() {
        let gateway = gateway(None, None);
        let err = gateway.hourly_forecast(los_angeles()).await.unwrap_err();
        assert!(matches!(err, WeatherSearchError::Upstream { .. }));
    }
}
