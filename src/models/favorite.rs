//! Favorite model for saved (city, state) pairs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WeatherSearchError;

pub const FIELDS_REQUIRED: &str = "City and state are required";

/// A saved location the user can re-select to run a forecast lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteEntry {
    /// Generated on creation, never changes
    #[serde(alias = "_id")]
    pub id: String,
    pub city: String,
    pub state: String,
}

impl FavoriteEntry {
    /// Create a new entry with a fresh id
    #[must_use]
    pub fn new<C: Into<String>, S: Into<String>>(city: C, state: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            city: city.into(),
            state: state.into(),
        }
    }

    /// Exact, case-sensitive match on both fields
    #[must_use]
    pub fn matches(&self, city: &str, state: &str) -> bool {
        self.city == city && self.state == state
    }
}

/// City and state as supplied by a caller, either as a JSON body or query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteParams {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl FavoriteParams {
    #[must_use]
    pub fn new<C: Into<String>, S: Into<String>>(city: C, state: S) -> Self {
        Self {
            city: Some(city.into()),
            state: Some(state.into()),
        }
    }

    /// Both fields must be present and non-empty
    pub fn require(self) -> crate::Result<(String, String)> {
        match (self.city, self.state) {
            (Some(city), Some(state)) if !city.is_empty() && !state.is_empty() => {
                Ok((city, state))
            }
            _ => Err(WeatherSearchError::validation(FIELDS_REQUIRED)),
        }
    }
}
