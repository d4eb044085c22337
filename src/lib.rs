//! # Forecast Cascade
//!
//! A Rust library for forecasting the next N points of a financial or
//! commodity price series from historical closing prices.
//!
//! ## Features
//!
//! - Log-return preprocessing with non-positive price detection
//! - Stochastic AR forecasting with deterministic, input-seeded residual
//!   bootstrap
//! - Drift ARIMA on log-returns or raw levels
//! - Damped-trend exponential smoothing and a linear-slope last resort
//! - A per-strategy fallback cascade that converts model failures into
//!   continuation and only fails once every candidate is exhausted
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_cascade::{forecast_str, PriceSeries};
//!
//! # fn main() -> forecast_cascade::Result<()> {
//! let closes: Vec<f64> = (0..60).map(|i| 100.0 + 0.5 * i as f64).collect();
//! let series = PriceSeries::new(closes)?;
//!
//! let result = forecast_str(&series, 5, "trend")?;
//! assert_eq!(result.values().len(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! Every forecast invocation is a self-contained, synchronous computation:
//! no shared state, no I/O, no cross-request ordering. The stochastic
//! strategy seeds its generator from the tail of the input series, so
//! identical requests produce bit-identical paths regardless of scheduling.

pub mod cascade;
pub mod error;
pub mod models;
pub mod series;
pub mod utils;

mod optimize;
mod stats;

// Re-export commonly used types
pub use crate::cascade::{forecast, forecast_str, Strategy, MAX_LOOKBACK, MIN_OBSERVATIONS};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ForecastResult, Forecaster};
pub use crate::series::PriceSeries;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
