use assert_approx_eq::assert_approx_eq;
use chrono::{Datelike, NaiveDate, Weekday};
use forecast_cascade::utils::{forecast_accuracy, future_business_days};
use forecast_cascade::ForecastResult;

#[test]
fn test_future_business_days_skips_weekends() {
    // 2024-01-05 is a Friday.
    let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    let dates = future_business_days(friday, 5);

    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    for date in &dates {
        assert_ne!(date.weekday(), Weekday::Sat);
        assert_ne!(date.weekday(), Weekday::Sun);
    }
}

#[test]
fn test_future_business_days_length_matches_horizon() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
    for horizon in [1, 7, 23] {
        assert_eq!(future_business_days(start, horizon).len(), horizon);
    }
}

#[test]
fn test_forecast_accuracy_known_values() {
    let forecast = [105.0, 106.0, 107.0];
    let actual = [106.0, 107.0, 108.0];

    let accuracy = forecast_accuracy(&forecast, &actual).unwrap();
    assert_approx_eq!(accuracy.mae, 1.0, 1e-9);
    assert_approx_eq!(accuracy.mse, 1.0, 1e-9);
    assert_approx_eq!(accuracy.rmse, 1.0, 1e-9);
    assert!(accuracy.mape > 0.0);
    assert!(accuracy.smape > 0.0);
}

#[test]
fn test_forecast_accuracy_rejects_mismatched_lengths() {
    let result = forecast_accuracy(&[1.0, 2.0], &[1.0]);
    assert!(result.is_err());

    let result = forecast_accuracy(&[], &[]);
    assert!(result.is_err());
}

#[test]
fn test_forecast_result_serializes_to_json() {
    let result = ForecastResult::new(vec![105.0, 106.5], 2).unwrap();
    let json = result.to_json().unwrap();

    assert!(json.contains("105.0"));
    assert!(json.contains("\"horizon\":2"));
}
