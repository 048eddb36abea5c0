//! Dashboard view assembly
//!
//! One refresh runs the whole acquisition pipeline for a city: the AQI feed
//! and the weather/pollution chain fetch concurrently, the routing probe
//! runs once coordinates are known, and the forecast is fitted over the
//! fetched series. Every upstream failure is caught here and converted into
//! an absent field plus a user-facing notice; the view always renders.

use crate::air_quality::AirQualityClient;
use crate::config::CityPulseConfig;
use crate::forecast::forecast_aqi;
use crate::models::{
    AqiRecord, City, Coordinates, ForecastRecord, PollutionComponents, TrafficSummary,
    WeatherSnapshot,
};
use crate::routing::RoutingClient;
use crate::weather::WeatherClient;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Orchestrates the three upstream clients and the forecast estimator.
pub struct DashboardService {
    weather: WeatherClient,
    routing: RoutingClient,
    air_quality: AirQualityClient,
}

/// Everything the frontend needs to render one city, with every upstream
/// result optional so partial failures still produce a usable page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardView {
    /// City this view describes
    pub city: City,
    /// When the view was assembled
    pub generated_at: DateTime<Utc>,
    /// Resolved coordinates, absent when the city lookup failed
    pub coordinates: Option<Coordinates>,
    /// Pollutant concentrations
    pub pollution: Option<PollutionComponents>,
    /// Current weather conditions
    pub weather: Option<WeatherSnapshot>,
    /// Probe-route traffic summary
    pub traffic: Option<TrafficSummary>,
    /// Current AQI scalar from the feed
    pub current_aqi: Option<i64>,
    /// Daily PM2.5 trend series
    pub history: Vec<AqiRecord>,
    /// Seven-day AQI projection
    pub forecast: Vec<ForecastRecord>,
    /// User-facing messages for every data source that is missing
    pub notices: Vec<String>,
}

impl DashboardService {
    /// Build the service and its clients from the loaded configuration.
    pub fn new(config: &CityPulseConfig) -> anyhow::Result<Self> {
        Ok(Self {
            weather: WeatherClient::new(&config.weather)?,
            routing: RoutingClient::new(&config.routing)?,
            air_quality: AirQualityClient::new(&config.air_quality)?,
        })
    }

    /// Run the full acquisition pipeline for a city.
    ///
    /// Never fails: each missing source becomes a notice on the view.
    #[instrument(skip(self))]
    pub async fn refresh(&self, city: City) -> DashboardView {
        info!("Refreshing dashboard for {}", city);

        let (history, pollution, weather) = tokio::join!(
            self.air_quality.fetch_history(city),
            self.weather.fetch_pollution(city),
            self.weather.current_weather(city),
        );

        // Routing depends on the resolved coordinates; either successful
        // weather call provides them.
        let coordinates = pollution
            .as_ref()
            .ok()
            .map(|(_, c)| *c)
            .or_else(|| weather.as_ref().ok().map(|(_, c)| *c));

        let traffic = match &coordinates {
            Some(origin) => Some(self.routing.fetch_traffic(origin).await),
            None => {
                warn!("Skipping traffic probe for {}: no coordinates", city);
                None
            }
        };

        DashboardView::assemble(city, history, pollution, weather, traffic)
    }
}

impl DashboardView {
    /// Combine the raw client results into the view model.
    ///
    /// `traffic` is `None` when the probe was skipped because coordinate
    /// resolution failed. Pure over its inputs, so degradation behavior is
    /// testable without any network access.
    #[must_use]
    pub fn assemble(
        city: City,
        history: Result<(Option<i64>, Vec<AqiRecord>)>,
        pollution: Result<(PollutionComponents, Coordinates)>,
        weather: Result<(WeatherSnapshot, Coordinates)>,
        traffic: Option<Result<TrafficSummary>>,
    ) -> Self {
        let mut notices = Vec::new();

        let (current_aqi, history) = match history {
            Ok(history) => history,
            Err(e) => {
                notices.push(e.user_message());
                (None, Vec::new())
            }
        };

        let mut coordinates = None;
        let pollution = match pollution {
            Ok((components, resolved)) => {
                coordinates = Some(resolved);
                Some(components)
            }
            Err(e) => {
                notices.push(e.user_message());
                None
            }
        };

        let weather = match weather {
            Ok((snapshot, resolved)) => {
                coordinates = coordinates.or(Some(resolved));
                Some(snapshot)
            }
            Err(e) => {
                notices.push(e.user_message());
                None
            }
        };

        let traffic = match traffic {
            Some(Ok(summary)) => Some(summary),
            Some(Err(e)) => {
                notices.push(e.user_message());
                None
            }
            None => {
                notices.push("Traffic data not available.".to_string());
                None
            }
        };

        let forecast = match forecast_aqi(&history) {
            Ok(forecast) => forecast,
            Err(e) => {
                notices.push(e.user_message());
                Vec::new()
            }
        };

        Self {
            city,
            generated_at: Utc::now(),
            coordinates,
            pollution,
            weather,
            traffic,
            current_aqi,
            history,
            forecast,
            notices,
        }
    }
}
