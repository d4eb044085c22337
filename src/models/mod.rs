//! Forecasting models for the cascade

use crate::error::{ForecastError, Result};
use crate::series::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Result of a forecast operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Forecasted values, forward chronological order
    values: Vec<f64>,
    /// Number of periods forecasted
    horizon: usize,
}

impl ForecastResult {
    /// Create a new forecast result, enforcing the output-shape invariant.
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::ModelFit(format!(
                "forecast produced {} values for a horizon of {}",
                values.len(),
                horizon
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "non-finite forecast value".to_string(),
            ));
        }
        Ok(Self { values, horizon })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Consume the result, returning the raw values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Serialize for the response layer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Uniform contract every forecaster in the cascade implements.
///
/// An attempt either yields exactly `horizon` future prices or an error the
/// controller converts into cascade continuation. Implementations hold no
/// state across calls; everything fitted lives and dies inside `attempt`.
pub trait Forecaster: Debug {
    /// Name of the model, used in logs and failure reports
    fn name(&self) -> &str;

    /// Try to produce exactly `horizon` future prices for `series`
    fn attempt(&self, series: &PriceSeries, horizon: usize) -> Result<ForecastResult>;
}

pub mod ar_bootstrap;
pub mod damped_trend;
pub mod drift_arima;
pub mod slope;
