//! `CityPulse` - Smart city monitoring dashboard backend
//!
//! This library provides the data-acquisition pipeline behind the dashboard:
//! weather and pollution lookup, a routed traffic probe, the AQI trend feed,
//! and a seven-day AQI forecast, assembled into a single view model served
//! over HTTP.

pub mod air_quality;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod models;
pub mod routing;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use air_quality::AirQualityClient;
pub use config::CityPulseConfig;
pub use dashboard::{DashboardService, DashboardView};
pub use error::CityPulseError;
pub use forecast::forecast_aqi;
pub use models::{
    AqiRecord, City, Coordinates, ForecastRecord, PollutionComponents, TrafficSummary,
    WeatherSnapshot,
};
pub use routing::RoutingClient;
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CityPulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
