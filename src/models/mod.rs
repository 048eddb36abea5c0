//! Data models for the CityPulse application
//!
//! This module contains the core domain models organized by concern:
//! - City: the fixed set of supported cities
//! - Location: geographic coordinates
//! - Air: pollution components and AQI series records
//! - Traffic: route summary and congestion derivation
//! - Weather: current weather snapshot

pub mod air;
pub mod city;
pub mod location;
pub mod traffic;
pub mod weather;

// Re-export all public types for convenient access
pub use air::{AqiRecord, ForecastRecord, PollutionComponents};
pub use city::City;
pub use location::Coordinates;
pub use traffic::TrafficSummary;
pub use weather::WeatherSnapshot;
