//! Price series container and log-return preprocessing

use crate::error::{ForecastError, Result};

/// Chronologically ordered closing prices for a single instrument.
///
/// Construction rejects empty input and non-finite values. Positivity is
/// deliberately not checked here: level-based forecasters accept any finite
/// price, and return-based forecasters report the offending index through
/// [`PriceSeries::log_returns`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Wrap a vector of closing prices.
    pub fn new(closes: Vec<f64>) -> Result<Self> {
        if closes.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "price series must not be empty".to_string(),
            ));
        }
        if let Some(index) = closes.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "non-finite price at index {}",
                index
            )));
        }
        Ok(Self { closes })
    }

    /// The raw closing prices, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.closes
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// The most recent closing price.
    pub fn last(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }

    /// Convert to log-returns: element i = ln(price[i+1]) - ln(price[i]).
    ///
    /// Computed fresh on every call. Fails with
    /// [`ForecastError::NonPositivePrice`] if any price is zero or negative,
    /// and with [`ForecastError::InsufficientData`] if fewer than
    /// `min_returns` returns result.
    pub fn log_returns(&self, min_returns: usize) -> Result<Vec<f64>> {
        if let Some((index, value)) = self
            .closes
            .iter()
            .enumerate()
            .find(|(_, v)| **v <= 0.0)
        {
            return Err(ForecastError::NonPositivePrice {
                index,
                value: *value,
            });
        }

        let returns: Vec<f64> = self
            .closes
            .windows(2)
            .map(|w| w[1].ln() - w[0].ln())
            .collect();

        if returns.len() < min_returns {
            return Err(ForecastError::InsufficientData {
                needed: min_returns,
                got: returns.len(),
            });
        }

        Ok(returns)
    }
}
