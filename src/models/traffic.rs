//! Traffic summary derived from a routed trip

use serde::{Deserialize, Serialize};

/// Reference speed used to derive the expected trip duration, in km/h.
const REFERENCE_SPEED_KMH: f64 = 50.0;

/// Summary of the synthetic probe route, with congestion derived from the
/// deviation between routed and reference-speed durations.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrafficSummary {
    /// Routed trip duration in seconds
    pub duration: f64,
    /// Trip distance in meters
    pub distance: f64,
    /// Duration expected at the reference speed, in seconds
    pub expected_duration: f64,
    /// Deviation of the routed duration from the expected one, in percent.
    /// Negative when traffic flows faster than the reference speed.
    pub congestion: f64,
}

impl TrafficSummary {
    /// Derive the summary from a routed duration (seconds) and distance
    /// (meters). Congestion is not clamped.
    #[must_use]
    pub fn from_route(duration: f64, distance: f64) -> Self {
        let expected_duration = (distance / 1000.0) / REFERENCE_SPEED_KMH * 3600.0;
        let congestion = (duration - expected_duration) / expected_duration * 100.0;
        Self {
            duration,
            distance,
            expected_duration,
            congestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    // 50 km in one hour is exactly the reference speed
    #[case(3600.0, 50_000.0, 3600.0, 0.0)]
    // twice as slow as the reference
    #[case(7200.0, 50_000.0, 3600.0, 100.0)]
    // faster than the reference: congestion goes negative
    #[case(1800.0, 50_000.0, 3600.0, -50.0)]
    fn test_congestion_derivation(
        #[case] duration: f64,
        #[case] distance: f64,
        #[case] expected_duration: f64,
        #[case] congestion: f64,
    ) {
        let summary = TrafficSummary::from_route(duration, distance);
        assert!((summary.expected_duration - expected_duration).abs() < 1e-9);
        assert!((summary.congestion - congestion).abs() < 1e-9);
    }

    #[test]
    fn test_short_route_keeps_raw_values() {
        let summary = TrafficSummary::from_route(180.0, 1400.0);
        assert_eq!(summary.duration, 180.0);
        assert_eq!(summary.distance, 1400.0);
    }
}
