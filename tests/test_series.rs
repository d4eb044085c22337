use assert_approx_eq::assert_approx_eq;
use forecast_cascade::{ForecastError, PriceSeries};

#[test]
fn test_price_series_rejects_empty_input() {
    let result = PriceSeries::new(Vec::new());
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_price_series_rejects_non_finite_input() {
    let result = PriceSeries::new(vec![100.0, f64::NAN, 102.0]);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));

    let result = PriceSeries::new(vec![100.0, f64::INFINITY]);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_price_series_accessors() {
    let series = PriceSeries::new(vec![100.0, 102.0, 101.0]).unwrap();

    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    assert_approx_eq!(series.last(), 101.0);
    assert_eq!(series.values(), &[100.0, 102.0, 101.0]);
}

#[test]
fn test_log_returns_values() {
    let series = PriceSeries::new(vec![100.0, 110.0, 99.0]).unwrap();
    let returns = series.log_returns(2).unwrap();

    assert_eq!(returns.len(), 2);
    assert_approx_eq!(returns[0], (110.0f64).ln() - (100.0f64).ln(), 1e-12);
    assert_approx_eq!(returns[1], (99.0f64).ln() - (110.0f64).ln(), 1e-12);
}

#[test]
fn test_log_returns_detects_non_positive_price() {
    let series = PriceSeries::new(vec![100.0, 0.0, 101.0]).unwrap();
    let err = series.log_returns(1).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::NonPositivePrice { index: 1, .. }
    ));

    let series = PriceSeries::new(vec![100.0, 101.0, -5.0]).unwrap();
    let err = series.log_returns(1).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::NonPositivePrice { index: 2, .. }
    ));
}

#[test]
fn test_log_returns_enforces_minimum_length() {
    let series = PriceSeries::new(vec![100.0; 20]).unwrap();
    let err = series.log_returns(30).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientData {
            needed: 30,
            got: 19
        }
    ));
}
