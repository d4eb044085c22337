//! Forecast cascade controller

use crate::error::{ForecastError, Result};
use crate::models::ar_bootstrap::ArBootstrap;
use crate::models::damped_trend::DampedTrendSmoother;
use crate::models::drift_arima::DriftArima;
use crate::models::slope::SlopeProjector;
use crate::models::{ForecastResult, Forecaster};
use crate::series::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Minimum observations before any forecaster is attempted.
pub const MIN_OBSERVATIONS: usize = 30;

/// Lookback cap the service layer applies before calling in, about two
/// trading years. The engine itself never truncates.
pub const MAX_LOOKBACK: usize = 504;

/// Requested forecasting strategy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// AR mean model plus bootstrapped residual shocks; one plausible path.
    #[default]
    Stochastic,
    /// Deterministic drift-ARMA path on log-returns.
    Arima,
    /// Trend-focused fallback stack on raw levels.
    Trend,
    /// Best-effort cascade over all deterministic models.
    Auto,
}

impl Strategy {
    /// Map a request string to a strategy family.
    ///
    /// Aliases follow the upstream service: an empty name selects the
    /// default, unknown names fall back to the best-effort cascade.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" => Self::default(),
            "stochastic" | "stochastic_ar" | "realistic" => Strategy::Stochastic,
            "sarimax" | "arima" => Strategy::Arima,
            "trend" | "holt" => Strategy::Trend,
            _ => Strategy::Auto,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Stochastic => "stochastic",
            Strategy::Arima => "arima",
            Strategy::Trend => "trend",
            Strategy::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}

/// Forecast `horizon` future prices for `series` with the given strategy.
///
/// The sole entrypoint of the engine. After input validation, a
/// user-selected single-shot strategy runs exactly one model and surfaces
/// its failure verbatim; the trend and auto families walk a fixed fallback
/// cascade until a candidate produces a length-correct output.
pub fn forecast(
    series: &PriceSeries,
    horizon: usize,
    strategy: Strategy,
) -> Result<ForecastResult> {
    if series.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            needed: MIN_OBSERVATIONS,
            got: series.len(),
        });
    }
    if horizon < 1 {
        return Err(ForecastError::InsufficientData {
            needed: 1,
            got: horizon,
        });
    }

    match strategy {
        // Single-shot strategies fail loudly when their statistical
        // assumptions are not met instead of silently substituting another
        // model family.
        Strategy::Stochastic => ArBootstrap::new().attempt(series, horizon),
        Strategy::Arima => DriftArima::on_returns().attempt(series, horizon),
        Strategy::Trend => run_cascade(
            &[
                &DriftArima::on_levels(),
                &DampedTrendSmoother::new(),
                &SlopeProjector::new(),
            ],
            series,
            horizon,
        ),
        Strategy::Auto => run_cascade(
            &[
                &DriftArima::on_returns(),
                &DriftArima::on_levels(),
                &DampedTrendSmoother::new(),
                &SlopeProjector::new(),
            ],
            series,
            horizon,
        ),
    }
}

/// As [`forecast`], with the strategy given as a raw request string.
pub fn forecast_str(series: &PriceSeries, horizon: usize, strategy: &str) -> Result<ForecastResult> {
    forecast(series, horizon, Strategy::parse(strategy))
}

/// Try each candidate in order; the first length-correct output wins.
///
/// Every attempt failure is recorded and converted into continuation; only
/// exhaustion of the whole list escapes, carrying the per-candidate notes.
pub fn run_cascade(
    candidates: &[&dyn Forecaster],
    series: &PriceSeries,
    horizon: usize,
) -> Result<ForecastResult> {
    let mut failures = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match candidate.attempt(series, horizon) {
            Ok(result) => {
                debug!(model = candidate.name(), "forecast succeeded");
                return Ok(result);
            }
            Err(err) => {
                debug!(
                    model = candidate.name(),
                    %err,
                    "forecast attempt failed, moving to next candidate"
                );
                failures.push(format!("{}: {}", candidate.name(), err));
            }
        }
    }

    warn!(
        candidates = candidates.len(),
        "every forecast candidate failed"
    );
    Err(ForecastError::AllModelsFailed(failures.join("; ")))
}
