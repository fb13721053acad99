//! Upstream forecast timeline schemas
//!
//! The forecast provider answers with a list of timelines, each holding
//! intervals of measured values. These types describe the parts of that
//! payload the service relies on; anything else passes through untouched.

use serde::{Deserialize, Serialize};

/// Top-level timelines response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timelines<V> {
    pub data: TimelinesData<V>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinesData<V> {
    pub timelines: Vec<Timeline<V>>,
}

/// One timeline at a single timestep (`1d`, `1h`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline<V> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub intervals: Vec<Interval<V>>,
}

/// Values measured for one timestep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interval<V> {
    pub start_time: String,
    pub values: V,
}

impl<V> Timelines<V> {
    /// Intervals of the first timeline, if there is one
    #[must_use]
    pub fn first_intervals(&self) -> Option<&[Interval<V>]> {
        self.data.timelines.first().map(|t| t.intervals.as_slice())
    }

    /// Consume the response, keeping only the first timeline's intervals
    #[must_use]
    pub fn into_first_intervals(self) -> Option<Vec<Interval<V>>> {
        self.data.timelines.into_iter().next().map(|t| t.intervals)
    }
}

/// Daily field set, imperial units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyValues {
    pub temperature: Option<f64>,
    pub temperature_apparent: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure_sea_level: Option<f64>,
    pub uv_index: Option<f64>,
    pub weather_code: Option<u32>,
    pub precipitation_probability: Option<f64>,
    pub precipitation_type: Option<u32>,
    pub sunrise_time: Option<String>,
    pub sunset_time: Option<String>,
    pub visibility: Option<f64>,
    pub moon_phase: Option<f64>,
    pub cloud_cover: Option<f64>,
}

/// Hourly field set used by the meteogram
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_sea_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_daily_payload_parses() {
        let payload = json!({
            "data": {
                "timelines": [{
                    "timestep": "1d",
                    "startTime": "2026-10-16T13:00:00Z",
                    "endTime": "2026-10-21T13:00:00Z",
                    "intervals": [{
                        "startTime": "2026-10-16T13:00:00Z",
                        "values": {
                            "temperatureMax": 78.4,
                            "temperatureMin": 61.2,
                            "windSpeed": 6.5,
                            "weatherCode": 1000,
                            "sunriseTime": "2026-10-16T14:04:00Z"
                        }
                    }]
                }]
            }
        });

        let parsed: Timelines<DailyValues> = serde_json::from_value(payload).unwrap();
        let intervals = parsed.first_intervals().unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].values.temperature_max, Some(78.4));
        assert_eq!(intervals[0].values.weather_code, Some(1000));
        assert_eq!(intervals[0].values.humidity, None);
    }

    #[test]
    fn test_missing_timelines_is_rejected() {
        let payload = json!({ "data": { "warnings": [] } });
        assert!(serde_json::from_value::<Timelines<DailyValues>>(payload).is_err());
    }

    #[test]
    fn test_hourly_values_serialize_camel_case() {
        let values = HourlyValues {
            temperature: Some(70.0),
            pressure_sea_level: Some(29.9),
            ..Default::default()
        };
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["pressureSeaLevel"], 29.9);
        assert!(json.get("humidity").is_none());
    }
}
