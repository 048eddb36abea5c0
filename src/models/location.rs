//! Geographic coordinates

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
///
/// Produced once per refresh by the weather client's city lookup and reused
/// by the routing client; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// A point shifted by the given amount on both axes.
    ///
    /// The routing client uses a fixed +0.01° shift to build its synthetic
    /// short demo route.
    #[must_use]
    pub fn offset(&self, degrees: f64) -> Self {
        Self {
            latitude: self.latitude + degrees,
            longitude: self.longitude + degrees,
        }
    }

    /// Format as `lat, lon` for logs and messages.
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_shifts_both_axes() {
        let origin = Coordinates::new(28.6667, 77.2167);
        let shifted = origin.offset(0.01);
        assert!((shifted.latitude - 28.6767).abs() < 1e-9);
        assert!((shifted.longitude - 77.2267).abs() < 1e-9);
    }

    #[test]
    fn test_format_coordinates() {
        let point = Coordinates::new(19.0176, 72.8562);
        assert_eq!(point.format_coordinates(), "19.0176, 72.8562");
    }
}
