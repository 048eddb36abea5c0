//! WAQI feed client: current AQI and the daily PM2.5 trend series
//!
//! The feed's "daily pm25" block is upstream's own forecast, not measured
//! history; the dashboard nevertheless treats it as the trend series to
//! display and refit, matching the feed's intended use. See DESIGN.md.

use crate::config::AirQualityConfig;
use crate::error::CityPulseError;
use crate::models::{AqiRecord, City};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for the WAQI city feed.
pub struct AirQualityClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl AirQualityClient {
    /// Create a new client from the air-quality section of the configuration.
    pub fn new(config: &AirQualityConfig) -> anyhow::Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| CityPulseError::config("air_quality.token is required"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("CityPulse/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            token,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch the current AQI and the daily PM2.5 series for a city.
    ///
    /// A feed whose status is not `"ok"` yields `(None, empty)` rather than
    /// an error; transport and parse failures surface as `AqiFetchFailed`.
    #[instrument(skip(self))]
    pub async fn fetch_history(&self, city: City) -> Result<(Option<i64>, Vec<AqiRecord>)> {
        let url = format!(
            "{}/feed/{}/?token={}",
            self.base_url,
            urlencoding::encode(city.name()),
            self.token
        );

        debug!("Requesting AQI feed for {}", city);

        let response: waqi::FeedResponse = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CityPulseError::aqi_fetch_failed(format!("request failed: {e}")))?
            .json()
            .await
            .map_err(|e| CityPulseError::aqi_fetch_failed(format!("invalid response: {e}")))?;

        let (current_aqi, series) = response.into_history();
        if current_aqi.is_none() && series.is_empty() {
            warn!("AQI feed for {} returned no usable data", city);
        } else {
            info!(
                "AQI feed for {}: current {:?}, {} trend days",
                city,
                current_aqi,
                series.len()
            );
        }

        Ok((current_aqi, series))
    }
}

/// WAQI feed response structures and extraction helpers
pub mod waqi {
    use super::*;

    /// Response from `/feed/{city}/`.
    #[derive(Debug, Deserialize)]
    pub struct FeedResponse {
        pub status: String,
        /// Payload object on success; the feed puts an error string here
        /// otherwise, so this stays untyped until the status is checked
        #[serde(default)]
        pub data: serde_json::Value,
    }

    #[derive(Debug, Deserialize)]
    pub struct FeedData {
        /// Current AQI; the feed sends `"-"` for stations without one,
        /// so this can be a number or a string
        pub aqi: Option<serde_json::Value>,
        pub forecast: Option<ForecastBlock>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastBlock {
        pub daily: Option<DailyBlock>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyBlock {
        #[serde(default)]
        pub pm25: Vec<DailyEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyEntry {
        pub day: String,
        pub avg: f64,
    }

    impl FeedResponse {
        /// Current AQI plus the daily PM2.5 series, in upstream order.
        ///
        /// A non-"ok" status yields `(None, empty)`. Entries whose day does
        /// not parse as a calendar date are skipped.
        #[must_use]
        pub fn into_history(self) -> (Option<i64>, Vec<AqiRecord>) {
            if self.status != "ok" {
                return (None, Vec::new());
            }

            let Ok(data) = serde_json::from_value::<FeedData>(self.data) else {
                return (None, Vec::new());
            };

            let current_aqi = data.aqi.as_ref().and_then(serde_json::Value::as_i64);

            let series = data
                .forecast
                .and_then(|f| f.daily)
                .map(|daily| {
                    daily
                        .pm25
                        .into_iter()
                        .filter_map(|entry| {
                            NaiveDate::parse_from_str(&entry.day, "%Y-%m-%d")
                                .ok()
                                .map(|date| AqiRecord::new(date, entry.avg))
                        })
                        .collect()
                })
                .unwrap_or_default();

            (current_aqi, series)
        }
    }
}
