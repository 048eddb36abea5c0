//! Current weather snapshot and display helpers

use serde::{Deserialize, Serialize};

/// Current weather conditions for a city.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Human-readable description of conditions
    pub description: String,
    /// Weather condition icon ID from the API
    pub icon: String,
}

impl WeatherSnapshot {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// URL of the upstream-provided icon for this condition.
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/w/{}.png", self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 31.4,
            humidity: 62.0,
            description: "haze".to_string(),
            icon: "50d".to_string(),
        }
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(snapshot().format_temperature(), "31.4°C");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            snapshot().icon_url(),
            "https://openweathermap.org/img/w/50d.png"
        );
    }
}
