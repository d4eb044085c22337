//! Last-resort linear slope projection

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, Forecaster};
use crate::series::PriceSeries;

/// Recent observations used for the least-squares fit.
const SLOPE_WINDOW: usize = 30;

/// Deterministic terminal fallback: fits a first-degree least-squares line
/// to the most recent window of prices and extends it forward.
#[derive(Debug, Clone)]
pub struct SlopeProjector {
    name: String,
    window: usize,
}

impl SlopeProjector {
    /// Projector over the standard 30-point window.
    pub fn new() -> Self {
        Self {
            name: format!("slope({})", SLOPE_WINDOW),
            window: SLOPE_WINDOW,
        }
    }

    /// Projector over a custom window.
    pub fn with_window(window: usize) -> Result<Self> {
        if window < 2 {
            return Err(ForecastError::InvalidParameter(
                "slope window must be at least 2".to_string(),
            ));
        }
        Ok(Self {
            name: format!("slope({})", window),
            window,
        })
    }
}

impl Default for SlopeProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for SlopeProjector {
    fn name(&self) -> &str {
        &self.name
    }

    fn attempt(&self, series: &PriceSeries, horizon: usize) -> Result<ForecastResult> {
        let prices = series.values();
        if prices.len() < 2 {
            return Err(ForecastError::ModelFit(
                "slope projection needs at least 2 points".to_string(),
            ));
        }

        let window = self.window.min(prices.len());
        let slope = fit_slope(&prices[prices.len() - window..]);
        let last = series.last();

        let values = (0..horizon)
            .map(|i| last + slope * (i + 1) as f64)
            .collect();
        ForecastResult::new(values, horizon)
    }
}

/// Least-squares slope of `y` against index positions 0..len-1.
fn fit_slope(y: &[f64]) -> f64 {
    let n = y.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &value) in y.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (value - y_mean);
        denominator += dx * dx;
    }

    numerator / denominator
}
