//! Integration tests for the CityPulse acquisition pipeline
//!
//! Exercises the public API end to end over recorded upstream payloads:
//! response extraction, view assembly with degradation, and the forecast
//! fitted on the extracted series. No network access required.

use chrono::{Duration, NaiveDate};
use citypulse::air_quality::waqi::FeedResponse;
use citypulse::routing::RouteResponse;
use citypulse::weather::openweather::{AirPollutionResponse, CurrentWeatherResponse};
use citypulse::{forecast_aqi, City, CityPulseError, DashboardView};

const WEATHER_FIXTURE: &str = r#"{
    "coord": {"lon": 77.2167, "lat": 28.6667},
    "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"}],
    "main": {"temp": 31.05, "feels_like": 32.8, "pressure": 1002, "humidity": 48},
    "name": "Delhi",
    "cod": 200
}"#;

const POLLUTION_FIXTURE: &str = r#"{
    "coord": {"lon": 77.2167, "lat": 28.6667},
    "list": [{
        "main": {"aqi": 5},
        "components": {
            "co": 1310.0, "no": 1.3, "no2": 30.8, "o3": 71.5,
            "so2": 13.8, "pm2_5": 182.2, "pm10": 214.5, "nh3": 12.9
        }
    }]
}"#;

const ROUTE_FIXTURE: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"summary": {"distance": 1628.9, "duration": 258.2}},
        "geometry": {"type": "LineString", "coordinates": []}
    }]
}"#;

const FEED_FIXTURE: &str = r#"{
    "status": "ok",
    "data": {
        "aqi": 168,
        "city": {"name": "Delhi"},
        "forecast": {"daily": {"pm25": [
            {"avg": 170.0, "day": "2024-09-29"},
            {"avg": 162.0, "day": "2024-09-30"},
            {"avg": 155.0, "day": "2024-10-01"},
            {"avg": 149.0, "day": "2024-10-02"},
            {"avg": 158.0, "day": "2024-10-03"},
            {"avg": 164.0, "day": "2024-10-04"},
            {"avg": 171.0, "day": "2024-10-05"}
        ]}}
    }
}"#;

fn full_view() -> DashboardView {
    let weather: CurrentWeatherResponse = serde_json::from_str(WEATHER_FIXTURE).unwrap();
    let pollution: AirPollutionResponse = serde_json::from_str(POLLUTION_FIXTURE).unwrap();
    let route: RouteResponse = serde_json::from_str(ROUTE_FIXTURE).unwrap();
    let feed: FeedResponse = serde_json::from_str(FEED_FIXTURE).unwrap();

    let coordinates = weather.coordinates().unwrap();
    let snapshot = weather.snapshot().unwrap();
    let components = pollution.into_components().unwrap();
    let summary = route.into_summary().unwrap();

    DashboardView::assemble(
        City::Delhi,
        Ok(feed.into_history()),
        Ok((components, coordinates)),
        Ok((snapshot, coordinates)),
        Some(Ok(summary)),
    )
}

#[test]
fn test_pipeline_produces_complete_view() {
    let view = full_view();

    assert_eq!(view.city, City::Delhi);
    assert_eq!(view.current_aqi, Some(168));
    assert_eq!(view.history.len(), 7);
    assert_eq!(view.forecast.len(), 7);
    assert!(view.notices.is_empty());

    let pollution = view.pollution.unwrap();
    assert!((pollution["pm2_5"] - 182.2).abs() < 1e-9);

    let weather = view.weather.unwrap();
    assert_eq!(weather.description, "haze");

    let traffic = view.traffic.unwrap();
    assert!((traffic.duration - 258.2).abs() < 1e-9);
}

#[test]
fn test_forecast_follows_extracted_series() {
    let view = full_view();

    let last_observed = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();
    assert_eq!(view.history.last().unwrap().date, last_observed);

    assert_eq!(view.forecast[0].date, last_observed + Duration::days(1));
    for pair in view.forecast.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
    }
    for record in &view.forecast {
        assert!(record.aqi.is_finite());
    }
}

#[test]
fn test_view_serializes_for_the_frontend() {
    let view = full_view();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["city"], "Delhi");
    assert_eq!(json["current_aqi"], 168);
    assert_eq!(json["history"].as_array().unwrap().len(), 7);
    assert_eq!(json["forecast"].as_array().unwrap().len(), 7);
    assert!(json["coordinates"]["latitude"].is_number());
}

#[test]
fn test_degraded_refresh_still_renders() {
    let feed: FeedResponse =
        serde_json::from_str(r#"{"status": "error", "data": "Unknown station"}"#).unwrap();

    let view = DashboardView::assemble(
        City::Lucknow,
        Ok(feed.into_history()),
        Err(CityPulseError::city_not_found("Lucknow")),
        Err(CityPulseError::city_not_found("Lucknow")),
        None,
    );

    assert!(view.coordinates.is_none());
    assert!(view.history.is_empty());
    assert!(view.forecast.is_empty());
    assert!(!view.notices.is_empty());
}

#[test]
fn test_empty_series_never_reaches_the_estimator_as_error() {
    assert!(forecast_aqi(&[]).unwrap().is_empty());
}
