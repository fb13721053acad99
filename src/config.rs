//! Configuration management for the weather search service
//!
//! Settings are layered: built-in defaults, then `weather-search.toml` (or an
//! explicit path), then `WEATHER_SEARCH__*` environment variables. Command
//! line flags are applied on top by the binary.

use crate::WeatherSearchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "weather-search.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSearchConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Forecast provider settings
    pub weather: WeatherConfig,
    /// Address geocoding and city suggestions
    pub geocoding: GeocodingConfig,
    /// IP-based location lookup
    pub ip_location: IpLocationConfig,
    /// Favorites storage
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Command line client settings
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Directory of prebuilt frontend assets served as the fallback route
    pub static_dir: Option<String>,
    /// PEM certificate chain; enables TLS together with `tls_key`
    pub tls_cert: Option<String>,
    /// PEM private key
    pub tls_key: Option<String>,
    /// Seconds in-flight requests get to finish on shutdown
    pub shutdown_grace_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// tomorrow.io API key
    pub api_key: String,
    /// Base URL of the timelines API
    pub base_url: String,
    /// IANA timezone daily forecasts are aligned to
    pub timezone: String,
    /// Unit system requested upstream
    pub units: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Google Maps API key
    pub api_key: String,
    /// Base URL of the Google Maps web services
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpLocationConfig {
    /// ipinfo access token; anonymous lookups are rate limited
    pub token: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory of the favorites database; empty means the platform data dir
    pub path: String,
    /// Keep favorites in memory only
    pub in_memory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where the command line client finds the weather search server
    pub backend_url: String,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_shutdown_grace_seconds() -> u64 {
    10
}

fn default_weather_base_url() -> String {
    "https://api.tomorrow.io/v4".to_string()
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_units() -> String {
    "imperial".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_ip_location_base_url() -> String {
    "https://ipinfo.io".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
            tls_cert: None,
            tls_key: None,
            shutdown_grace_seconds: default_shutdown_grace_seconds(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            timezone: default_timezone(),
            units: default_units(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_geocoding_base_url(),
        }
    }
}

impl Default for IpLocationConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_ip_location_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
        }
    }
}

impl ServerConfig {
    /// Certificate and key paths when TLS is configured
    #[must_use]
    pub fn tls_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some((PathBuf::from(cert), PathBuf::from(key))),
            _ => None,
        }
    }
}

impl StoreConfig {
    /// Database directory, falling back to the platform data directory
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if !self.path.is_empty() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir()
            .map(|dir| dir.join("weather-search").join("favorites"))
            .unwrap_or_else(|| PathBuf::from("data").join("favorites"))
    }
}

impl WeatherSearchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                local
            } else {
                Self::get_config_path().unwrap_or(local)
            }
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHER_SEARCH__WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_SEARCH")
                .prefix_separator("__")
                .separator("__"),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherSearchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-search").join(CONFIG_FILE_NAME))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.bind.is_empty() {
            self.server.bind = default_bind();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timezone.is_empty() {
            self.weather.timezone = default_timezone();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_units();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.ip_location.base_url.is_empty() {
            self.ip_location.base_url = default_ip_location_base_url();
        }
        if self.ip_location.token.as_deref() == Some("") {
            self.ip_location.token = None;
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.client.backend_url.is_empty() {
            self.client.backend_url = default_backend_url();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_server()?;
        self.validate_urls()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<()> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(WeatherSearchError::config(format!(
                "Invalid bind address '{}'. Expected host:port, e.g. 0.0.0.0:5000",
                self.server.bind
            ))
            .into());
        }

        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(WeatherSearchError::config(
                "TLS requires both server.tls_cert and server.tls_key",
            )
            .into());
        }

        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("weather.base_url", &self.weather.base_url),
            ("geocoding.base_url", &self.geocoding.base_url),
            ("ip_location.base_url", &self.ip_location.base_url),
            ("client.backend_url", &self.client.backend_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherSearchError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherSearchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherSearchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_units = ["imperial", "metric"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(WeatherSearchError::config(format!(
                "Invalid units '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        if self.weather.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(WeatherSearchError::config(format!(
                "Unknown timezone '{}'",
                self.weather.timezone
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WeatherSearchConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.weather.base_url, "https://api.tomorrow.io/v4");
        assert_eq!(config.weather.timezone, "America/Los_Angeles");
        assert_eq!(config.weather.units, "imperial");
        assert_eq!(config.logging.level, "info");
        assert!(!config.store.in_memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherSearchConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_rejects_bad_urls() {
        let mut config = WeatherSearchConfig::default();
        config.geocoding.base_url = "maps.googleapis.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("geocoding.base_url"));
    }

    #[test]
    fn test_config_validation_half_configured_tls() {
        let mut config = WeatherSearchConfig::default();
        config.server.tls_cert = Some("cert.pem".to_string());
        assert!(config.validate().is_err());

        config.server.tls_key = Some("key.pem".to_string());
        assert!(config.validate().is_ok());
        assert!(config.server.tls_paths().is_some());
    }

    #[test]
    fn test_config_validation_unknown_timezone() {
        let mut config = WeatherSearchConfig::default();
        config.weather.timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = WeatherSearchConfig::default();
        config.weather.base_url.clear();
        config.logging.format.clear();
        config.ip_location.token = Some(String::new());

        config.apply_defaults();

        assert_eq!(config.weather.base_url, "https://api.tomorrow.io/v4");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.ip_location.token.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
bind = "127.0.0.1:8080"

[weather]
api_key = "file-key"

[store]
in_memory = true
"#
        )
        .unwrap();

        let config = WeatherSearchConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.weather.api_key, "file-key");
        assert_eq!(config.weather.timezone, "America/Los_Angeles");
        assert!(config.store.in_memory);
    }

    #[test]
    fn test_store_path_override() {
        let store = StoreConfig {
            path: "/tmp/favorites".to_string(),
            in_memory: false,
        };
        assert_eq!(store.resolved_path(), PathBuf::from("/tmp/favorites"));
        assert!(!StoreConfig::default().resolved_path().as_os_str().is_empty());
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WeatherSearchConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weather-search"));
            assert!(path.to_string_lossy().ends_with(CONFIG_FILE_NAME));
        }
    }
}
