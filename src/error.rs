//! Error types for the forecast_cascade crate

use thiserror::Error;

/// Custom error types for the forecast_cascade crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Series (or derived return series) shorter than a method's minimum
    #[error("insufficient data: need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A non-positive price breaks log-return math
    #[error("non-positive price {value} at index {index}")]
    NonPositivePrice { index: usize, value: f64 },

    /// Numerical fitting failed to converge or produced non-finite parameters
    #[error("model fit error: {0}")]
    ModelFit(String),

    /// Not enough valid residuals to run the bootstrap simulation
    #[error("bootstrap error: {0}")]
    Bootstrap(String),

    /// Every candidate in the active cascade failed
    #[error("all forecasting models failed: {0}")]
    AllModelsFailed(String),

    /// Error from invalid parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error serializing a forecast result
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
