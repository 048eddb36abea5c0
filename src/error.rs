//! Error types and handling for the CityPulse application

use thiserror::Error;

/// Main error type for the CityPulse application.
///
/// The first six variants mirror the per-source failure modes of the data
/// pipeline; the aggregation layer converts each of them into an absent
/// value plus a user-facing notice rather than letting them escape.
#[derive(Error, Debug)]
pub enum CityPulseError {
    /// The weather provider could not resolve the city to coordinates
    #[error("city not found: {city}")]
    CityNotFound { city: String },

    /// The pollution endpoint returned no usable data for the coordinates
    #[error("pollution data unavailable for {city}")]
    PollutionUnavailable { city: String },

    /// The current-weather payload was missing or malformed
    #[error("weather data unavailable for {city}")]
    WeatherUnavailable { city: String },

    /// The routing provider returned no route, or the request failed
    #[error("route unavailable: {message}")]
    RouteUnavailable { message: String },

    /// The AQI feed request failed at the transport or parse level
    #[error("AQI feed fetch failed: {message}")]
    AqiFetchFailed { message: String },

    /// The forecast model could not be fitted to the series
    #[error("forecast unavailable: {message}")]
    ForecastUnavailable { message: String },

    /// Configuration-related errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Outbound HTTP errors
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

impl CityPulseError {
    pub fn city_not_found<S: Into<String>>(city: S) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    pub fn pollution_unavailable<S: Into<String>>(city: S) -> Self {
        Self::PollutionUnavailable { city: city.into() }
    }

    pub fn weather_unavailable<S: Into<String>>(city: S) -> Self {
        Self::WeatherUnavailable { city: city.into() }
    }

    pub fn route_unavailable<S: Into<String>>(message: S) -> Self {
        Self::RouteUnavailable {
            message: message.into(),
        }
    }

    pub fn aqi_fetch_failed<S: Into<String>>(message: S) -> Self {
        Self::AqiFetchFailed {
            message: message.into(),
        }
    }

    pub fn forecast_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ForecastUnavailable {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly message suitable for the dashboard notice area.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CityPulseError::CityNotFound { city } => {
                format!("City '{city}' not found or invalid API key.")
            }
            CityPulseError::PollutionUnavailable { .. } => {
                "Pollution data not available for the selected city.".to_string()
            }
            CityPulseError::WeatherUnavailable { .. } => {
                "Weather data not available.".to_string()
            }
            CityPulseError::RouteUnavailable { .. } => "Traffic data not available.".to_string(),
            CityPulseError::AqiFetchFailed { .. } => {
                "Failed to fetch historical AQI data.".to_string()
            }
            CityPulseError::ForecastUnavailable { .. } => {
                "AQI forecast not available.".to_string()
            }
            CityPulseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            CityPulseError::Http { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let city_err = CityPulseError::city_not_found("Delhi");
        assert!(matches!(city_err, CityPulseError::CityNotFound { .. }));

        let route_err = CityPulseError::route_unavailable("no features");
        assert!(matches!(route_err, CityPulseError::RouteUnavailable { .. }));

        let forecast_err = CityPulseError::forecast_unavailable("series too short");
        assert!(matches!(
            forecast_err,
            CityPulseError::ForecastUnavailable { .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        let city_err = CityPulseError::city_not_found("Delhi");
        assert!(city_err.user_message().contains("Delhi"));

        let route_err = CityPulseError::route_unavailable("timeout");
        assert_eq!(route_err.user_message(), "Traffic data not available.");

        let aqi_err = CityPulseError::aqi_fetch_failed("bad status");
        assert!(aqi_err.user_message().contains("historical AQI"));
    }

    #[test]
    fn test_display_carries_context() {
        let err = CityPulseError::pollution_unavailable("Pune");
        assert_eq!(err.to_string(), "pollution data unavailable for Pune");
    }
}
