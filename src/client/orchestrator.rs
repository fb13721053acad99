use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use super::services::{ForecastBackend, IpLocator, PlaceLookup, PlaceSuggestion};
use super::state::{Effect, Event, FetchedForecast, ViewState, transition};
use super::{GoogleMapsClient, HttpBackend, IpInfoClient};
use crate::Result;
use crate::config::WeatherSearchConfig;
use crate::models::WeatherQuery;

/// Runs the effects `transition` asks for and feeds their outcomes back in.
///
/// Calls are made one at a time in the order effects are produced; nothing is
/// cancelled.
pub struct Orchestrator {
    state: ViewState,
    places: Arc<dyn PlaceLookup>,
    locator: Arc<dyn IpLocator>,
    backend: Arc<dyn ForecastBackend>,
}

impl Orchestrator {
    pub fn new(
        places: Arc<dyn PlaceLookup>,
        locator: Arc<dyn IpLocator>,
        backend: Arc<dyn ForecastBackend>,
    ) -> Self {
        Self {
            state: ViewState::default(),
            places,
            locator,
            backend,
        }
    }

    /// Orchestrator wired to Google Maps, ipinfo and the configured server
    pub fn from_config(config: &WeatherSearchConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(GoogleMapsClient::new(&config.geocoding)?),
            Arc::new(IpInfoClient::new(&config.ip_location)?),
            Arc::new(HttpBackend::new(&config.client)?),
        ))
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply an event and every follow-up it causes
    pub async fn dispatch(&mut self, event: Event) -> &ViewState {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let current = std::mem::take(&mut self.state);
            let (next, effects) = transition(current, event);
            self.state = next;
            debug!(phase = ?self.state.phase, effects = effects.len(), "Transitioned");

            for effect in effects {
                queue.push_back(self.run(effect).await);
            }
        }
        &self.state
    }

    /// City autocomplete for the form; failures yield no suggestions
    pub async fn suggest_cities(&self, input: &str) -> Vec<PlaceSuggestion> {
        self.places.suggest(input).await.unwrap_or_else(|e| {
            warn!("City suggestions unavailable: {}", e);
            Vec::new()
        })
    }

    async fn run(&self, effect: Effect) -> Event {
        match effect {
            Effect::Validate => Event::FormChecked,
            Effect::LocateByIp => match self.locator.locate().await {
                Ok(location) => Event::LocationResolved(location),
                Err(e) => Event::LocationFailed(e.to_string()),
            },
            Effect::Geocode {
                address,
                city,
                state,
            } => match self.places.geocode(&address).await {
                Ok(coordinates) => Event::Geocoded {
                    coordinates,
                    city,
                    state,
                },
                Err(e) => Event::GeocodeFailed(e.to_string()),
            },
            Effect::FetchForecast(query) => match self.fetch_forecast(&query).await {
                Ok(fetched) => Event::ForecastLoaded(Box::new(fetched)),
                Err(e) => Event::ForecastFailed(e.to_string()),
            },
            Effect::LoadFavorites => match self.backend.list_favorites().await {
                Ok(favorites) => Event::FavoritesLoaded(favorites),
                Err(e) => Event::FavoritesFailed(e.to_string()),
            },
            Effect::AddFavorite { city, state } => {
                match self.backend.add_favorite(&city, &state).await {
                    Ok(entry) => Event::FavoriteAdded(entry),
                    Err(e) => Event::FavoriteChangeFailed(e.to_string()),
                }
            }
            Effect::RemoveFavorite { city, state } => {
                match self.backend.remove_favorite(&city, &state).await {
                    Ok(()) => Event::FavoriteRemoved { city, state },
                    Err(e) => Event::FavoriteChangeFailed(e.to_string()),
                }
            }
        }
    }

    /// Daily, then hourly, then whether the place is already a favorite
    async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<FetchedForecast> {
        let daily = self.backend.daily(query).await?;
        let hourly = self.backend.hourly(query.coordinates).await?;
        let days = daily.daily_intervals().map(|d| d.len()).unwrap_or(0);

        let favorited = match self.backend.list_favorites().await {
            Ok(favorites) => favorites.iter().any(|f| f.matches(&query.city, &query.state)),
            Err(e) => {
                warn!("Could not check favorite status: {}", e);
                false
            }
        };

        Ok(FetchedForecast {
            daily,
            hourly,
            days,
            favorited,
        })
    }
}
