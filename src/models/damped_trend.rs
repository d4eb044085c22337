//! Additive damped-trend exponential smoothing

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, Forecaster};
use crate::optimize::{nelder_mead, NelderMeadConfig};
use crate::series::PriceSeries;
use statrs::statistics::Statistics;

/// Search bounds for (alpha, beta, phi).
const PARAM_BOUNDS: [(f64, f64); 3] = [(1e-4, 0.9999), (1e-4, 0.9999), (0.8, 0.98)];
/// Simplex start for (alpha, beta, phi).
const PARAM_START: [f64; 3] = [0.3, 0.1, 0.98];

/// Damped-trend exponential smoothing fitted directly to raw price levels.
///
/// Smoothing level, trend and damping coefficient are estimated by
/// minimizing the in-sample one-step squared error. The damping keeps the
/// trend's influence decaying geometrically over the horizon instead of
/// running away linearly.
#[derive(Debug, Clone)]
pub struct DampedTrendSmoother {
    name: String,
}

impl DampedTrendSmoother {
    pub fn new() -> Self {
        Self {
            name: "damped-trend smoothing".to_string(),
        }
    }
}

impl Default for DampedTrendSmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for DampedTrendSmoother {
    fn name(&self) -> &str {
        &self.name
    }

    fn attempt(&self, series: &PriceSeries, horizon: usize) -> Result<ForecastResult> {
        let prices = series.values();
        if prices.len() < 3 {
            return Err(ForecastError::ModelFit(
                "damped trend smoothing needs at least 3 points".to_string(),
            ));
        }

        let mean = prices.mean();
        let variance = prices.variance();
        if !variance.is_finite() || variance <= 1e-12 * (mean * mean).max(1.0) {
            return Err(ForecastError::ModelFit(
                "degenerate series: near-zero variance".to_string(),
            ));
        }

        let fit = nelder_mead(
            |p| one_step_sse(prices, p[0], p[1], p[2]),
            &PARAM_START,
            &PARAM_BOUNDS,
            &NelderMeadConfig::default(),
        );
        if !fit.converged || !fit.value.is_finite() {
            return Err(ForecastError::ModelFit(
                "damped trend optimizer did not converge".to_string(),
            ));
        }

        let (alpha, beta, phi) = (fit.point[0], fit.point[1], fit.point[2]);
        let (level, trend) = smooth(prices, alpha, beta, phi);

        let mut values = Vec::with_capacity(horizon);
        let mut damped_sum = 0.0;
        for h in 1..=horizon {
            damped_sum += phi.powi(h as i32);
            values.push(level + damped_sum * trend);
        }
        ForecastResult::new(values, horizon)
    }
}

/// One pass of the smoothing recursion, returning the final level and trend.
///
/// State: level <- alpha*y + (1-alpha)(level + phi*trend),
///        trend <- beta*(level - level_prev) + (1-beta)*phi*trend.
fn smooth(values: &[f64], alpha: f64, beta: f64, phi: f64) -> (f64, f64) {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    for &y in &values[1..] {
        let level_prev = level;
        level = alpha * y + (1.0 - alpha) * (level_prev + phi * trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
    }
    (level, trend)
}

/// In-sample one-step squared error for a parameter triple.
fn one_step_sse(values: &[f64], alpha: f64, beta: f64, phi: f64) -> f64 {
    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut total = 0.0;
    for &y in &values[1..] {
        let forecast = level + phi * trend;
        let error = y - forecast;
        total += error * error;

        let level_prev = level;
        level = alpha * y + (1.0 - alpha) * (level_prev + phi * trend);
        trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
    }
    if total.is_finite() {
        total
    } else {
        f64::INFINITY
    }
}
