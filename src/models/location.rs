//! Location model for validated coordinates and outbound weather queries

use serde::{Deserialize, Serialize};

use crate::error::WeatherSearchError;

pub const INVALID_COORDINATES: &str = "Invalid or missing coordinates";

/// A latitude/longitude pair that passed validation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Validate raw coordinates.
    ///
    /// Zero on either axis counts as missing, so points on the equator or the
    /// prime meridian are rejected.
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> crate::Result<Self> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(WeatherSearchError::validation(INVALID_COORDINATES));
        };

        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range || latitude == 0.0 || longitude == 0.0 {
            return Err(WeatherSearchError::validation(INVALID_COORDINATES));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Validate coordinates given as query string values; unparsable values count as missing
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> crate::Result<Self> {
        Self::new(
            latitude.and_then(|v| v.trim().parse().ok()),
            longitude.and_then(|v| v.trim().parse().ok()),
        )
    }

    /// Parse a `"lat,lon"` pair as returned by IP geolocation lookups
    pub fn from_pair(pair: &str) -> crate::Result<Self> {
        let mut parts = pair.split(',');
        let coordinates = Self::parse(parts.next(), parts.next())?;
        if parts.next().is_some() {
            return Err(WeatherSearchError::validation(INVALID_COORDINATES));
        }
        Ok(coordinates)
    }

    /// Format as `lat,lon` for upstream location parameters
    #[must_use]
    pub fn to_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One outbound daily forecast request; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub coordinates: Coordinates,
    pub city: String,
    pub state: String,
}

impl WeatherQuery {
    #[must_use]
    pub fn new<C: Into<String>, S: Into<String>>(coordinates: Coordinates, city: C, state: S) -> Self {
        Self {
            coordinates,
            city: city.into(),
            state: state.into(),
        }
    }
}
