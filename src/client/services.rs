//! Capabilities the orchestrator drives

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::{Coordinates, FavoriteEntry, ForecastResult, HourlyForecast, WeatherQuery};

/// City suggestion from place autocomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub city: String,
}

/// Approximate location of the caller's public IP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpLocation {
    pub city: String,
    /// State or region name as reported by the lookup
    pub region: String,
    /// `"lat,lon"`
    pub loc: String,
}

/// Address geocoding and city autocomplete
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// US cities matching the partial input
    async fn suggest(&self, input: &str) -> Result<Vec<PlaceSuggestion>>;

    /// Coordinates of the best match, `None` when the address has no results
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;
}

#[async_trait]
pub trait IpLocator: Send + Sync {
    async fn locate(&self) -> Result<IpLocation>;
}

/// The weather search server as seen by a client
#[async_trait]
pub trait ForecastBackend: Send + Sync {
    async fn daily(&self, query: &WeatherQuery) -> Result<ForecastResult>;

    async fn hourly(&self, coordinates: Coordinates) -> Result<HourlyForecast>;

    async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>>;

    async fn add_favorite(&self, city: &str, state: &str) -> Result<FavoriteEntry>;

    async fn remove_favorite(&self, city: &str, state: &str) -> Result<()>;
}
