//! Configuration management for the CityPulse application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The loaded
//! struct is built once at startup and passed into each API client; no
//! credential lives in process-global state.

use crate::CityPulseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the CityPulse application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CityPulseConfig {
    /// Weather + pollution provider (OpenWeatherMap)
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Routing provider (OpenRouteService)
    #[serde(default)]
    pub routing: RoutingConfig,
    /// AQI feed provider (WAQI)
    #[serde(default)]
    pub air_quality: AirQualityConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// OpenWeatherMap configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API key for both the weather and air-pollution endpoints
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// OpenRouteService configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// API key for the directions endpoint
    pub api_key: Option<String>,
    /// Base URL for the routing API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// WAQI feed configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityConfig {
    /// WAQI API token
    pub token: Option<String>,
    /// Base URL for the AQI feed
    #[serde(default = "default_air_quality_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the dashboard API listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_port() -> u16 {
    8080
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_routing_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AirQualityConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_air_quality_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl CityPulseConfig {
    /// Load configuration from file and environment variables
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

        // Environment variable overrides with CITYPULSE_ prefix, e.g.
        // CITYPULSE_WEATHER__API_KEY, CITYPULSE_AIR_QUALITY__TOKEN
        builder = builder.add_source(
            Environment::with_prefix("CITYPULSE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CityPulseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("citypulse").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_urls()?;
        self.validate_timeouts()?;
        Ok(())
    }

    /// Validate API keys and tokens
    fn validate_credentials(&self) -> Result<()> {
        for (name, credential) in [
            ("weather.api_key", &self.weather.api_key),
            ("routing.api_key", &self.routing.api_key),
            ("air_quality.token", &self.air_quality.token),
        ] {
            if let Some(value) = credential {
                if value.is_empty() {
                    return Err(CityPulseError::config(format!(
                        "{name} cannot be empty if provided. Either remove it or provide a valid credential."
                    ))
                    .into());
                }
                if value.len() < 8 {
                    return Err(CityPulseError::config(format!(
                        "{name} appears to be invalid (too short). Please check your credential."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("weather.base_url", &self.weather.base_url),
            ("routing.base_url", &self.routing.base_url),
            ("air_quality.base_url", &self.air_quality.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CityPulseError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_timeouts(&self) -> Result<()> {
        for (name, timeout) in [
            ("weather.timeout_seconds", self.weather.timeout_seconds),
            ("routing.timeout_seconds", self.routing.timeout_seconds),
            (
                "air_quality.timeout_seconds",
                self.air_quality.timeout_seconds,
            ),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(CityPulseError::config(format!(
                    "{name} must be between 1 and 300 seconds"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CityPulseConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.routing.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.air_quality.base_url, "https://api.waqi.info");
        assert_eq!(config.server.port, 8080);
        assert!(config.weather.api_key.is_none());
        assert!(config.air_quality.token.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(CityPulseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_credential() {
        let mut config = CityPulseConfig::default();
        config.weather.api_key = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("weather.api_key"));
    }

    #[test]
    fn test_validation_rejects_short_token() {
        let mut config = CityPulseConfig::default();
        config.air_quality.token = Some("short".to_string());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = CityPulseConfig::default();
        config.routing.base_url = "ftp://example.org".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("routing.base_url"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = CityPulseConfig::default();
        config.weather.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = CityPulseConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("citypulse"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
