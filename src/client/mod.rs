//! Client side of the weather search: form state machine, orchestration and
//! the external services it talks to.

use reqwest::Client;

use crate::{Result, WeatherSearchError};

pub mod backend;
pub mod google;
pub mod ipinfo;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod states;

pub use backend::HttpBackend;
pub use google::GoogleMapsClient;
pub use ipinfo::IpInfoClient;
pub use orchestrator::Orchestrator;
pub use services::{ForecastBackend, IpLocation, IpLocator, PlaceLookup, PlaceSuggestion};
pub use state::{Effect, Event, FetchedForecast, Phase, Tab, ViewState, transition};
pub use states::expand_state;

fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("weather-search/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WeatherSearchError::config(format!("Failed to create HTTP client: {e}")))
}
