//! OpenWeatherMap client: city lookup, current weather and air pollution
//!
//! The current-weather endpoint doubles as the city-to-coordinates resolver;
//! the air-pollution endpoint is then queried at the resolved coordinates.

use crate::config::WeatherConfig;
use crate::error::CityPulseError;
use crate::models::{City, Coordinates, PollutionComponents, WeatherSnapshot};
use crate::Result;
use anyhow::Context;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for the OpenWeatherMap weather and air-pollution endpoints.
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new client from the weather section of the configuration.
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| CityPulseError::config("weather.api_key is required"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("CityPulse/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch air-pollution component concentrations for a city.
    ///
    /// Resolves the city to coordinates first; a response without coordinate
    /// fields means the city is unknown upstream and there is nothing to
    /// query pollution for.
    #[instrument(skip(self))]
    pub async fn fetch_pollution(
        &self,
        city: City,
    ) -> Result<(PollutionComponents, Coordinates)> {
        let weather = self.current(city).await?;

        let coordinates = weather
            .coordinates()
            .ok_or_else(|| CityPulseError::city_not_found(city.name()))?;

        debug!(
            "Resolved {} to {}",
            city,
            coordinates.format_coordinates()
        );

        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            self.base_url, coordinates.latitude, coordinates.longitude, self.api_key
        );

        let response: openweather::AirPollutionResponse =
            self.client.get(url).send().await?.json().await?;

        let components = response
            .into_components()
            .ok_or_else(|| CityPulseError::pollution_unavailable(city.name()))?;

        info!(
            "Fetched {} pollutant concentrations for {}",
            components.len(),
            city
        );

        Ok((components, coordinates))
    }

    /// Fetch the current weather snapshot for a city, in metric units.
    #[instrument(skip(self))]
    pub async fn current_weather(&self, city: City) -> Result<(WeatherSnapshot, Coordinates)> {
        let weather = self.current(city).await?;

        let coordinates = weather
            .coordinates()
            .ok_or_else(|| CityPulseError::city_not_found(city.name()))?;

        let snapshot = weather
            .snapshot()
            .ok_or_else(|| CityPulseError::weather_unavailable(city.name()))?;

        info!(
            "Current weather for {}: {} at {}",
            city,
            snapshot.description,
            snapshot.format_temperature()
        );

        Ok((snapshot, coordinates))
    }

    async fn current(&self, city: City) -> Result<openweather::CurrentWeatherResponse> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(city.name()),
            self.api_key
        );

        debug!("Requesting current weather for {}", city);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!(
                "Current weather request for {} returned HTTP {}",
                city,
                response.status()
            );
        }

        Ok(response.json().await?)
    }
}

/// OpenWeatherMap API response structures and extraction helpers
pub mod openweather {
    use crate::models::{Coordinates, PollutionComponents, WeatherSnapshot};
    use serde::Deserialize;

    /// Response from `/data/2.5/weather`. Coordinates are absent when the
    /// city is unknown, so everything here is optional.
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub coord: Option<Coord>,
        pub main: Option<MainData>,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f64,
        pub humidity: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
        pub icon: String,
    }

    /// Response from `/data/2.5/air_pollution`.
    #[derive(Debug, Deserialize)]
    pub struct AirPollutionResponse {
        #[serde(default)]
        pub list: Vec<PollutionEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PollutionEntry {
        #[serde(default)]
        pub components: PollutionComponents,
    }

    impl CurrentWeatherResponse {
        /// Coordinates of the resolved city, if the lookup succeeded.
        #[must_use]
        pub fn coordinates(&self) -> Option<Coordinates> {
            self.coord
                .as_ref()
                .map(|c| Coordinates::new(c.lat, c.lon))
        }

        /// Current conditions, if the payload carries them.
        #[must_use]
        pub fn snapshot(&self) -> Option<WeatherSnapshot> {
            let main = self.main.as_ref()?;
            let condition = self.weather.first()?;
            Some(WeatherSnapshot {
                temperature: main.temp,
                humidity: main.humidity,
                description: condition.description.clone(),
                icon: condition.icon.clone(),
            })
        }
    }

    impl AirPollutionResponse {
        /// Component map of the first (most recent) entry, or `None` when
        /// the data list is empty or carries no concentrations.
        #[must_use]
        pub fn into_components(self) -> Option<PollutionComponents> {
            self.list
                .into_iter()
                .next()
                .map(|entry| entry.components)
                .filter(|components| !components.is_empty())
        }
    }
}
