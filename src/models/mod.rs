//! Data models for the weather search service
//!
//! This module contains the domain models organized by concern:
//! - Favorite: saved (city, state) pairs and their request shapes
//! - Location: validated coordinates and the outbound weather query
//! - Forecast: gateway responses echoed back to clients
//! - Weather: upstream timeline schemas validated at the boundary

pub mod favorite;
pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use favorite::{FIELDS_REQUIRED, FavoriteEntry, FavoriteParams};
pub use forecast::{ForecastResult, HourlyForecast};
pub use location::{Coordinates, INVALID_COORDINATES, WeatherQuery};
pub use weather::{DailyValues, HourlyValues, Interval, Timeline, Timelines};
