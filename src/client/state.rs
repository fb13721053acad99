//! Form and view state with pure transitions
//!
//! `transition` never performs I/O. It returns the next state together with
//! the effects to run; the orchestrator runs them and feeds the outcome back
//! in as events.

use crate::models::{Coordinates, FavoriteEntry, ForecastResult, HourlyForecast, WeatherQuery};

use super::services::IpLocation;
use super::states::expand_state;

pub const STREET_REQUIRED: &str = "Please enter a valid street";
pub const CITY_REQUIRED: &str = "Please enter a valid city";
pub const STATE_REQUIRED: &str = "Please select your state";
pub const NO_RESULTS: &str = "No results found for the address.";
pub const GEOCODE_FAILED: &str = "Error fetching location data from Google Maps API.";
pub const LOCATION_FAILED: &str = "Error fetching location data.";
pub const FORECAST_FAILED: &str = "Failed to fetch weather data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Locating,
    Validating,
    Fetching,
    ShowingResults,
    ShowingFavorites,
    ShowingDetail {
        day: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Results,
    Favorites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub street: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub street: Option<&'static str>,
    pub city: Option<&'static str>,
    pub state: Option<&'static str>,
}

impl FieldErrors {
    fn check(form: &FormFields) -> Self {
        let missing = |value: &str, message| value.trim().is_empty().then_some(message);
        Self {
            street: missing(&form.street, STREET_REQUIRED),
            city: missing(&form.city, CITY_REQUIRED),
            state: missing(&form.state, STATE_REQUIRED),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none()
    }
}

/// Everything shown for one successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedForecast {
    pub daily: ForecastResult,
    pub hourly: HourlyForecast,
    /// Number of daily intervals in `daily`
    pub days: usize,
    pub favorited: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub tab: Tab,
    pub form: FormFields,
    pub autodetect: bool,
    pub location: Option<IpLocation>,
    pub errors: FieldErrors,
    pub error_message: Option<String>,
    pub results: Option<FetchedForecast>,
    pub favorites: Vec<FavoriteEntry>,
    pub last_visited_day: Option<usize>,
    /// Submit arrived while the IP lookup was still running
    pub submit_pending: bool,
}

impl ViewState {
    /// Submit is allowed when autodetecting or when every field is filled in
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.autodetect || FieldErrors::check(&self.form).is_empty()
    }

    fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Locating | Phase::Validating | Phase::Fetching
        )
    }

    fn resting_phase(&self) -> Phase {
        match (self.tab, &self.results) {
            (Tab::Favorites, _) => Phase::ShowingFavorites,
            (Tab::Results, Some(_)) => Phase::ShowingResults,
            (Tab::Results, None) => Phase::Idle,
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Idle;
        self.submit_pending = false;
        self.error_message = Some(message.into());
    }

    fn start_fetch(&mut self) {
        self.tab = Tab::Results;
        self.phase = Phase::Fetching;
        self.results = None;
        self.error_message = None;
        self.last_visited_day = None;
        self.submit_pending = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EditStreet(String),
    EditCity(String),
    EditState(String),
    ToggleAutodetect,
    LocationResolved(IpLocation),
    LocationFailed(String),
    Submit,
    /// Outcome of `Effect::Validate`
    FormChecked,
    Geocoded {
        coordinates: Option<Coordinates>,
        city: String,
        state: String,
    },
    GeocodeFailed(String),
    ForecastLoaded(Box<FetchedForecast>),
    ForecastFailed(String),
    SelectDay(usize),
    Back,
    ReopenLastDay,
    ShowTab(Tab),
    FavoritesLoaded(Vec<FavoriteEntry>),
    FavoritesFailed(String),
    SelectFavorite {
        city: String,
        state: String,
    },
    ToggleFavorite,
    RemoveFavorite {
        city: String,
        state: String,
    },
    FavoriteAdded(FavoriteEntry),
    FavoriteRemoved {
        city: String,
        state: String,
    },
    FavoriteChangeFailed(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Validate,
    LocateByIp,
    Geocode {
        address: String,
        city: String,
        state: String,
    },
    FetchForecast(WeatherQuery),
    LoadFavorites,
    AddFavorite {
        city: String,
        state: String,
    },
    RemoveFavorite {
        city: String,
        state: String,
    },
}

/// Query for the held IP location, with the region expanded to a full name
fn located_query(location: &IpLocation) -> crate::Result<WeatherQuery> {
    let coordinates = Coordinates::from_pair(&location.loc)?;
    Ok(WeatherQuery::new(
        coordinates,
        location.city.clone(),
        expand_state(&location.region),
    ))
}

fn fetch_located(mut state: ViewState) -> (ViewState, Vec<Effect>) {
    let Some(location) = state.location.clone() else {
        state.submit_pending = true;
        if state.phase == Phase::Locating {
            return (state, Vec::new());
        }
        // An earlier lookup failed; ask again
        state.error_message = None;
        state.phase = Phase::Locating;
        return (state, vec![Effect::LocateByIp]);
    };

    state.start_fetch();
    match located_query(&location) {
        Ok(query) => (state, vec![Effect::FetchForecast(query)]),
        Err(_) => {
            state.fail(LOCATION_FAILED);
            (state, Vec::new())
        }
    }
}

#[must_use]
pub fn transition(mut state: ViewState, event: Event) -> (ViewState, Vec<Effect>) {
    match event {
        Event::EditStreet(value) => {
            state.form.street = value;
            state.errors.street = None;
        }
        Event::EditCity(value) => {
            state.form.city = value;
            state.errors.city = None;
        }
        Event::EditState(value) => {
            state.form.state = value;
            state.errors.state = None;
        }

        Event::ToggleAutodetect => {
            state.autodetect = !state.autodetect;
            state.location = None;
            state.submit_pending = false;
            if state.autodetect {
                state.errors = FieldErrors::default();
                state.phase = Phase::Locating;
                return (state, vec![Effect::LocateByIp]);
            }
            if state.phase == Phase::Locating {
                state.phase = state.resting_phase();
            }
        }
        Event::LocationResolved(location) => {
            if !state.autodetect {
                return (state, Vec::new());
            }
            state.location = Some(location);
            if state.submit_pending {
                return fetch_located(state);
            }
            if state.phase == Phase::Locating {
                state.phase = state.resting_phase();
            }
        }
        Event::LocationFailed(_) => {
            if state.autodetect {
                state.fail(LOCATION_FAILED);
            }
        }

        Event::Submit => {
            if matches!(state.phase, Phase::Validating | Phase::Fetching) {
                return (state, Vec::new());
            }
            state.tab = Tab::Results;
            state.results = None;
            state.error_message = None;
            if state.autodetect {
                return fetch_located(state);
            }
            state.phase = Phase::Validating;
            return (state, vec![Effect::Validate]);
        }
        Event::FormChecked => {
            if state.phase != Phase::Validating {
                return (state, Vec::new());
            }
            state.errors = FieldErrors::check(&state.form);
            if !state.errors.is_empty() {
                state.phase = Phase::Idle;
                return (state, Vec::new());
            }
            let form = state.form.clone();
            state.start_fetch();
            let effect = Effect::Geocode {
                address: format!("{}, {}, {}", form.street, form.city, form.state),
                city: form.city,
                state: expand_state(&form.state),
            };
            return (state, vec![effect]);
        }

        Event::Geocoded {
            coordinates,
            city,
            state: state_name,
        } => {
            if state.phase != Phase::Fetching {
                return (state, Vec::new());
            }
            match coordinates {
                Some(coordinates) => {
                    let query = WeatherQuery::new(coordinates, city, state_name);
                    return (state, vec![Effect::FetchForecast(query)]);
                }
                None => state.fail(NO_RESULTS),
            }
        }
        Event::GeocodeFailed(_) => {
            if state.phase == Phase::Fetching {
                state.fail(GEOCODE_FAILED);
            }
        }
        Event::ForecastLoaded(fetched) => {
            if state.phase != Phase::Fetching {
                return (state, Vec::new());
            }
            state.last_visited_day = (fetched.days > 0).then_some(0);
            state.results = Some(*fetched);
            state.phase = state.resting_phase();
        }
        Event::ForecastFailed(_) => {
            if state.phase == Phase::Fetching {
                state.fail(FORECAST_FAILED);
            }
        }

        Event::SelectDay(day) => {
            let days = state.results.as_ref().map_or(0, |r| r.days);
            if state.tab == Tab::Results && !state.is_busy() && day < days {
                state.phase = Phase::ShowingDetail { day };
                state.last_visited_day = Some(day);
            }
        }
        Event::Back => {
            if matches!(state.phase, Phase::ShowingDetail { .. }) {
                state.phase = state.resting_phase();
            }
        }
        Event::ReopenLastDay => {
            if let (Phase::ShowingResults, Some(day)) = (state.phase, state.last_visited_day) {
                state.phase = Phase::ShowingDetail { day };
            }
        }

        Event::ShowTab(tab) => {
            state.tab = tab;
            if !state.is_busy() {
                state.phase = state.resting_phase();
            }
            if tab == Tab::Favorites {
                return (state, vec![Effect::LoadFavorites]);
            }
        }
        Event::FavoritesLoaded(favorites) => {
            state.favorites = favorites;
        }
        Event::FavoritesFailed(message) => {
            tracing::warn!("Could not load favorites: {}", message);
        }
        Event::SelectFavorite {
            city,
            state: state_name,
        } => {
            if matches!(state.phase, Phase::Validating | Phase::Fetching) {
                return (state, Vec::new());
            }
            state.start_fetch();
            let effect = Effect::Geocode {
                address: format!("{city}, {state_name}"),
                city,
                state: state_name,
            };
            return (state, vec![effect]);
        }

        Event::ToggleFavorite => {
            let Some(results) = &state.results else {
                return (state, Vec::new());
            };
            let city = results.daily.city.clone();
            let state_name = results.daily.state.clone();
            let effect = if results.favorited {
                Effect::RemoveFavorite {
                    city,
                    state: state_name,
                }
            } else {
                Effect::AddFavorite {
                    city,
                    state: state_name,
                }
            };
            return (state, vec![effect]);
        }
        Event::RemoveFavorite {
            city,
            state: state_name,
        } => {
            return (
                state,
                vec![Effect::RemoveFavorite {
                    city,
                    state: state_name,
                }],
            );
        }
        Event::FavoriteAdded(entry) => {
            if let Some(results) = &mut state.results {
                if results.daily.city == entry.city && results.daily.state == entry.state {
                    results.favorited = true;
                }
            }
            state.favorites.push(entry);
        }
        Event::FavoriteRemoved {
            city,
            state: state_name,
        } => {
            state.favorites.retain(|f| !f.matches(&city, &state_name));
            if let Some(results) = &mut state.results {
                if results.daily.city == city && results.daily.state == state_name {
                    results.favorited = false;
                }
            }
        }
        Event::FavoriteChangeFailed(message) => {
            tracing::warn!("Could not update favorites: {}", message);
        }

        Event::Reset => {
            let favorites = std::mem::take(&mut state.favorites);
            return (
                ViewState {
                    favorites,
                    ..ViewState::default()
                },
                Vec::new(),
            );
        }
    }

    (state, Vec::new())
}
