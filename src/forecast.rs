//! AQI forecast estimator
//!
//! Fits an ARIMA(1,1,1) model to the PM2.5 trend series and projects seven
//! further days. Coefficients are estimated with the Hannan-Rissanen
//! two-stage procedure: an AR(1) bootstrap supplies residual estimates,
//! then the AR and MA coefficients are solved jointly by least squares on
//! the first-differenced, mean-centered series.

use crate::error::CityPulseError;
use crate::models::{AqiRecord, ForecastRecord};
use crate::Result;
use chrono::Duration;
use tracing::{debug, instrument};

/// Days projected beyond the end of the input series.
pub const FORECAST_HORIZON_DAYS: usize = 7;

/// Guard for near-zero denominators in the least-squares solves.
const EPS: f64 = 1e-12;

/// Project the AQI series [`FORECAST_HORIZON_DAYS`] days past its end.
///
/// An empty series yields an empty forecast. A series too short or too
/// degenerate to fit yields `ForecastUnavailable`; the caller renders the
/// absence instead of crashing the dashboard.
#[instrument(skip(series), fields(len = series.len()))]
pub fn forecast_aqi(series: &[AqiRecord]) -> Result<Vec<ForecastRecord>> {
    if series.is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<f64> = series.iter().map(|record| record.aqi).collect();
    let model = Arima::fit(&values)?;

    debug!(
        "Fitted ARIMA(1,1,1): phi={:.4}, theta={:.4}, drift={:.4}",
        model.phi, model.theta, model.drift
    );

    let last_date = series[series.len() - 1].date;
    let forecast = model
        .forecast(FORECAST_HORIZON_DAYS)
        .into_iter()
        .enumerate()
        .map(|(step, aqi)| ForecastRecord {
            date: last_date + Duration::days(step as i64 + 1),
            aqi,
        })
        .collect();

    Ok(forecast)
}

/// Fitted ARIMA(1,1,1) state: coefficients plus the terminal values the
/// forecast recursion starts from.
struct Arima {
    /// AR(1) coefficient on the centered differences
    phi: f64,
    /// MA(1) coefficient on the shocks
    theta: f64,
    /// Mean of the first differences
    drift: f64,
    /// Last observed level
    last_level: f64,
    /// Last centered difference
    last_diff: f64,
    /// Last estimated shock
    last_shock: f64,
}

impl Arima {
    fn fit(values: &[f64]) -> Result<Self> {
        // d=1: work on first differences
        let diffs: Vec<f64> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
        if diffs.len() < 3 {
            return Err(CityPulseError::forecast_unavailable(format!(
                "need at least 4 observations, got {}",
                values.len()
            )));
        }

        let drift = diffs.iter().sum::<f64>() / diffs.len() as f64;
        let centered: Vec<f64> = diffs.iter().map(|w| w - drift).collect();

        // Stage 1: AR(1) bootstrap for residual estimates
        let mut lag_num = 0.0;
        let mut lag_den = 0.0;
        for t in 1..centered.len() {
            lag_num += centered[t] * centered[t - 1];
            lag_den += centered[t - 1] * centered[t - 1];
        }
        let phi_boot = if lag_den > EPS { lag_num / lag_den } else { 0.0 };

        let mut shocks = vec![0.0; centered.len()];
        for t in 1..centered.len() {
            shocks[t] = centered[t] - phi_boot * centered[t - 1];
        }

        // Stage 2: joint least squares on lagged difference and lagged shock
        let (mut saa, mut sab, mut sbb, mut saz, mut sbz) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for t in 1..centered.len() {
            let a = centered[t - 1];
            let b = shocks[t - 1];
            saa += a * a;
            sab += a * b;
            sbb += b * b;
            saz += a * centered[t];
            sbz += b * centered[t];
        }

        let det = saa * sbb - sab * sab;
        let (phi, theta) = if det.abs() > EPS {
            ((sbb * saz - sab * sbz) / det, (saa * sbz - sab * saz) / det)
        } else if saa > EPS {
            // shocks carry no signal: fall back to the AR-only estimate
            (phi_boot, 0.0)
        } else {
            // flat after differencing: pure drift
            (0.0, 0.0)
        };

        if !phi.is_finite() || !theta.is_finite() {
            return Err(CityPulseError::forecast_unavailable(
                "coefficient estimation diverged",
            ));
        }

        // Keep the recursion stationary and invertible
        let phi = phi.clamp(-0.99, 0.99);
        let theta = theta.clamp(-0.99, 0.99);

        // Final shock sequence under the fitted coefficients
        let mut shock = 0.0;
        for t in 1..centered.len() {
            shock = centered[t] - phi * centered[t - 1] - theta * shock;
        }

        Ok(Self {
            phi,
            theta,
            drift,
            last_level: values[values.len() - 1],
            last_diff: centered[centered.len() - 1],
            last_shock: shock,
        })
    }

    /// Forecast `steps` levels ahead with future shocks at zero.
    fn forecast(&self, steps: usize) -> Vec<f64> {
        let mut projected = Vec::with_capacity(steps);
        let mut diff = self.phi * self.last_diff + self.theta * self.last_shock;
        let mut level = self.last_level;
        for _ in 0..steps {
            level += self.drift + diff;
            projected.push(level);
            diff *= self.phi;
        }
        projected
    }
}
