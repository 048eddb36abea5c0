//! Supported cities for the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of cities the dashboard can monitor.
///
/// Upstream feeds are keyed by plain city name, so the enum doubles as the
/// query string sent to the APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Delhi,
    Mumbai,
    Bangalore,
    Kolkata,
    Chennai,
    Hyderabad,
    Ahmedabad,
    Pune,
    Jaipur,
    Lucknow,
}

impl City {
    /// All supported cities, in display order.
    pub const ALL: [City; 10] = [
        City::Delhi,
        City::Mumbai,
        City::Bangalore,
        City::Kolkata,
        City::Chennai,
        City::Hyderabad,
        City::Ahmedabad,
        City::Pune,
        City::Jaipur,
        City::Lucknow,
    ];

    /// City name as sent to the upstream APIs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Bangalore => "Bangalore",
            City::Kolkata => "Kolkata",
            City::Chennai => "Chennai",
            City::Hyderabad => "Hyderabad",
            City::Ahmedabad => "Ahmedabad",
            City::Pune => "Pune",
            City::Jaipur => "Jaipur",
            City::Lucknow => "Lucknow",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .copied()
            .find(|city| city.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCity(s.to_string()))
    }
}

/// Returned when a request names a city outside the supported list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCity(pub String);

impl fmt::Display for UnknownCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported city: {}", self.0)
    }
}

impl std::error::Error for UnknownCity {}
