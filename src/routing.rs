//! OpenRouteService client: synthetic probe route and congestion estimate
//!
//! Routes from the resolved city point to a fixed +0.01° offset point. The
//! destination is a deliberate demo simplification, not a navigational
//! feature; the interesting output is the deviation of routed duration from
//! the 50 km/h reference, not the route itself.

use crate::config::RoutingConfig;
use crate::error::CityPulseError;
use crate::models::{Coordinates, TrafficSummary};
use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Offset applied to both axes to form the synthetic destination.
const PROBE_OFFSET_DEGREES: f64 = 0.01;

/// Client for the OpenRouteService directions endpoint.
pub struct RoutingClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RoutingClient {
    /// Create a new client from the routing section of the configuration.
    pub fn new(config: &RoutingConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| CityPulseError::config("routing.api_key is required"))?;

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

    /// Route the probe trip and derive the traffic summary.
    ///
    /// Transport failures and routeless responses both surface as
    /// `RouteUnavailable`; the caller degrades to an absent traffic section.
    #[instrument(skip(self), fields(origin = %origin.format_coordinates()))]
    pub async fn fetch_traffic(&self, origin: &Coordinates) -> Result<TrafficSummary> {
        let destination = origin.offset(PROBE_OFFSET_DEGREES);

        // ORS expects (lon, lat) order
        let url = format!(
            "{}/v2/directions/driving-car?api_key={}&start={},{}&end={},{}",
            self.base_url,
            self.api_key,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        debug!("Requesting probe route");

        let response: RouteResponse = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CityPulseError::route_unavailable(format!("request failed: {e}")))?
            .json()
            .await
            .map_err(|e| CityPulseError::route_unavailable(format!("invalid response: {e}")))?;

        let summary = response
            .into_summary()
            .ok_or_else(|| CityPulseError::route_unavailable("no route features in response"))?;

        info!(
            "Probe route: {:.0}s over {:.0}m, congestion {:.1}%",
            summary.duration, summary.distance, summary.congestion
        );

        Ok(summary)
    }
}

/// GeoJSON-shaped response from `/v2/directions/driving-car`.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    pub properties: RouteProperties,
}

#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    pub summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
pub struct RouteSummary {
    /// Routed duration in seconds
    pub duration: f64,
    /// Routed distance in meters
    pub distance: f64,
}

impl RouteResponse {
    /// Traffic summary of the first route feature, if any was returned.
    #[must_use]
    pub fn into_summary(self) -> Option<TrafficSummary> {
        self.features
            .into_iter()
            .next()
            .map(|feature| {
                TrafficSummary::from_route(
                    feature.properties.summary.duration,
                    feature.properties.summary.distance,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_response_derives_summary() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "summary": {"distance": 1628.9, "duration": 258.2}
                },
                "geometry": {"type": "LineString", "coordinates": []}
            }]
        }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        let summary = response.into_summary().unwrap();
        assert!((summary.duration - 258.2).abs() < 1e-9);
        assert!((summary.distance - 1628.9).abs() < 1e-9);
        // 1.6289 km at 50 km/h is ~117s, so the probe route is congested
        assert!(summary.congestion > 0.0);
    }

    #[test]
    fn test_empty_features_yields_none() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(response.into_summary().is_none());
    }

    #[test]
    fn test_missing_features_field_yields_none() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"error": {"code": 2010, "message": "..."}}"#).unwrap();
        assert!(response.into_summary().is_none());
    }
}
