//! Error types and handling for the weather search service

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the weather search service
#[derive(Error, Debug)]
pub enum WeatherSearchError {
    /// Missing or malformed required input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A favorite with the same city and state already exists
    #[error("Favorite already exists: {city}, {state}")]
    DuplicateEntry { city: String, state: String },

    /// The favorite to delete does not exist
    #[error("Favorite not found: {city}, {state}")]
    NotFound { city: String, state: String },

    /// Any failure talking to geocoding, weather or location services
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Favorites store failures
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherSearchError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new duplicate favorite error
    pub fn duplicate<C: Into<String>, S: Into<String>>(city: C, state: S) -> Self {
        Self::DuplicateEntry {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Create a new missing favorite error
    pub fn not_found<C: Into<String>, S: Into<String>>(city: C, state: S) -> Self {
        Self::NotFound {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error surfaces as
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::DuplicateEntry { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream { .. }
            | Self::Persistence { .. }
            | Self::Config { .. }
            | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller caused this error
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::DuplicateEntry { .. } => "Favorite already exists".to_string(),
            Self::NotFound { .. } => "Record not found".to_string(),
            Self::Upstream { .. } => {
                "Unable to reach external services. Please try again later.".to_string()
            }
            Self::Persistence { .. } => "Favorites storage is unavailable.".to_string(),
            Self::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            Self::Io { .. } => "File operation failed. Please check file permissions.".to_string(),
        }
    }
}

/// Request URLs carry API keys in their query, so they are dropped here
impl From<reqwest::Error> for WeatherSearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::upstream(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WeatherSearchError::validation("City and state are required");
        assert!(matches!(err, WeatherSearchError::Validation { .. }));

        let err = WeatherSearchError::duplicate("Los Angeles", "CA");
        assert!(matches!(err, WeatherSearchError::DuplicateEntry { .. }));

        let err = WeatherSearchError::not_found("Boston", "MA");
        assert!(matches!(err, WeatherSearchError::NotFound { .. }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WeatherSearchError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WeatherSearchError::duplicate("a", "b").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WeatherSearchError::not_found("a", "b").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WeatherSearchError::upstream("503").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherSearchError::persistence("disk full").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages_hide_internal_detail() {
        let err = WeatherSearchError::upstream("HTTP 401 for https://api.example/?apikey=secret");
        assert!(!err.user_message().contains("secret"));

        let err = WeatherSearchError::persistence("journal corrupted at /var/lib/x");
        assert!(!err.user_message().contains("/var/lib"));

        let err = WeatherSearchError::validation("City and state are required");
        assert_eq!(err.user_message(), "City and state are required");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WeatherSearchError = io_err.into();
        assert!(matches!(err, WeatherSearchError::Io { .. }));
        assert!(!err.is_client_error());
    }
}
