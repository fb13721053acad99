//! `weather-search` - weather lookup and favorites
//!
//! This library provides the forecast gateway and favorites service behind
//! the HTTP API, plus the client-side state machine and presentation
//! builders used by the terminal client.

pub mod api;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, router};
pub use config::WeatherSearchConfig;
pub use error::WeatherSearchError;
pub use models::{Coordinates, FavoriteEntry, ForecastResult, HourlyForecast, WeatherQuery};
pub use store::FavoritesStore;
pub use weather::{ForecastProvider, WeatherGateway};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
