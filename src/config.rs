//! Configuration management for `RotaFlex`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::RotaflexError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration structure for `RotaFlex`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RotaflexConfig {
    /// Address-search service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Routing service configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web API configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Address-search service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Search endpoint of a Nominatim-compatible service
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Maximum number of autocomplete suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u32,
}

/// Routing service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Driving-route endpoint of an OpenRouteService-compatible service
    #[serde(default = "default_directions_url")]
    pub directions_url: String,
    /// Default API key for the CLI and web API; the library takes keys per call
    pub api_key: Option<String>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds, none by default
    pub timeout_seconds: Option<u32>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,
}

// Default value functions
fn default_search_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_suggestion_limit() -> u32 {
    5
}

fn default_directions_url() -> String {
    "https://api.openrouteservice.org/v2/directions/driving-car/geojson".to_string()
}

fn default_user_agent() -> String {
    format!("RotaFlex/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            directions_url: default_directions_url(),
            api_key: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: None,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl RotaflexConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. ROTAFLEX__ROUTING__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("ROTAFLEX")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: RotaflexConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rotaflex").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoding.search_url.is_empty() {
            self.geocoding.search_url = default_search_url();
        }
        if self.geocoding.suggestion_limit == 0 {
            self.geocoding.suggestion_limit = default_suggestion_limit();
        }
        if self.routing.directions_url.is_empty() {
            self.routing.directions_url = default_directions_url();
        }
        if self.routing.api_key.as_deref() == Some("") {
            self.routing.api_key = None;
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.bind.is_empty() {
            self.server.bind = default_bind();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("Geocoding search URL", &self.geocoding.search_url),
            ("Routing directions URL", &self.routing.directions_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(RotaflexError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=50).contains(&self.geocoding.suggestion_limit) {
            return Err(
                RotaflexError::config("Suggestion limit must be between 1 and 50").into(),
            );
        }

        if let Some(timeout) = self.http.timeout_seconds {
            if timeout > 300 {
                return Err(
                    RotaflexError::config("HTTP timeout cannot exceed 300 seconds").into(),
                );
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RotaflexError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(RotaflexError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(RotaflexError::config(format!(
                "Invalid server bind address '{}'",
                self.server.bind
            ))
            .into());
        }

        Ok(())
    }
}
