//! Forecast responses handed back to clients

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Coordinates, DailyValues, HourlyValues, Interval, Timelines, WeatherQuery};

/// Daily forecast wrapped with the location it was requested for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Upstream payload, verbatim
    pub weather: Value,
}

impl ForecastResult {
    #[must_use]
    pub fn new(query: WeatherQuery, weather: Value) -> Self {
        Self {
            city: query.city,
            state: query.state,
            latitude: query.coordinates.latitude,
            longitude: query.coordinates.longitude,
            weather,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Typed view of the daily intervals carried in the payload
    pub fn daily_intervals(&self) -> crate::Result<Vec<Interval<DailyValues>>> {
        let timelines: Timelines<DailyValues> = serde_json::from_value(self.weather.clone())
            .map_err(|e| {
                crate::WeatherSearchError::upstream(format!("unexpected daily forecast shape: {e}"))
            })?;
        Ok(timelines.into_first_intervals().unwrap_or_default())
    }
}

/// Hourly intervals of the first upstream timeline
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HourlyForecast {
    pub data: Vec<Interval<HourlyValues>>,
}
