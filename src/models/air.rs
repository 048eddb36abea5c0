//! Air quality models: pollutant concentrations and AQI series records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pollutant concentrations in µg/m³, keyed by the names the upstream API
/// uses (`pm2_5`, `pm10`, `co`, ...). Key order is irrelevant.
pub type PollutionComponents = HashMap<String, f64>;

/// One day of the PM2.5 AQI trend series.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AqiRecord {
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// Average PM2.5 AQI for the day
    pub aqi: f64,
}

/// One projected day of the AQI forecast. Same shape as [`AqiRecord`];
/// kept as its own type so the view model distinguishes observed from
/// projected values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastRecord {
    /// Calendar date of the projection
    pub date: NaiveDate,
    /// Projected PM2.5 AQI
    pub aqi: f64,
}

impl AqiRecord {
    #[must_use]
    pub fn new(date: NaiveDate, aqi: f64) -> Self {
        Self { date, aqi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_date_as_iso() {
        let record = AqiRecord::new(NaiveDate::from_ymd_opt(2024, 10, 3).unwrap(), 112.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-10-03");
        assert_eq!(json["aqi"], 112.0);
    }
}
