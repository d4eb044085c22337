//! Shared numeric kernels for the forecasting models

use crate::error::{ForecastError, Result};
use statrs::statistics::{Data, OrderStatistics};

/// Ordinary least squares via the normal equations.
///
/// `rows` holds one regressor vector per observation (including any
/// intercept column the caller wants); `targets` is the dependent variable.
pub(crate) fn least_squares(rows: &[Vec<f64>], targets: &[f64]) -> Result<Vec<f64>> {
    let n = rows.len();
    if n == 0 || n != targets.len() {
        return Err(ForecastError::ModelFit(
            "regression requires matching, non-empty observations".to_string(),
        ));
    }
    let k = rows[0].len();
    if k == 0 || n < k {
        return Err(ForecastError::ModelFit(format!(
            "underdetermined regression: {} observations for {} coefficients",
            n, k
        )));
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &y) in rows.iter().zip(targets) {
        for i in 0..k {
            xty[i] += row[i] * y;
            for j in i..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    solve_linear_system(xtx, xty)
}

/// Gaussian elimination with partial pivoting. Fails on a singular system.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Err(ForecastError::ModelFit(
            "singular covariance in least squares".to_string(),
        ));
    }
    let tolerance = scale * 1e-12;

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < tolerance {
            return Err(ForecastError::ModelFit(
                "singular covariance in least squares".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for j in row + 1..n {
            sum -= a[row][j] * x[j];
        }
        x[row] = sum / a[row][row];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::ModelFit(
            "non-finite regression coefficients".to_string(),
        ));
    }
    Ok(x)
}

/// Interpolated percentile of a sample, `p` in whole percent.
pub(crate) fn percentile(values: &[f64], p: usize) -> f64 {
    let mut data = Data::new(values.to_vec());
    data.percentile(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_least_squares_recovers_line() {
        // y = 2 + 3x
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|i| 2.0 + 3.0 * i as f64).collect();

        let coef = least_squares(&rows, &targets).unwrap();
        assert_approx_eq!(coef[0], 2.0, 1e-9);
        assert_approx_eq!(coef[1], 3.0, 1e-9);
    }

    #[test]
    fn test_least_squares_recovers_ar_coefficients() {
        // x[t] = 0.5 + 0.6 x[t-1], started from 1.0
        let mut x = vec![1.0];
        for _ in 0..200 {
            let last = *x.last().unwrap();
            x.push(0.5 + 0.6 * last);
        }

        let rows: Vec<Vec<f64>> = (1..x.len()).map(|t| vec![1.0, x[t - 1]]).collect();
        let targets: Vec<f64> = (1..x.len()).map(|t| x[t]).collect();

        // The sequence converges to its fixed point, so only the early
        // observations carry identifying variation; they are enough.
        let coef = least_squares(&rows[..50], &targets[..50]).unwrap();
        assert_approx_eq!(coef[0], 0.5, 1e-6);
        assert_approx_eq!(coef[1], 0.6, 1e-6);
    }

    #[test]
    fn test_least_squares_rejects_collinear_columns() {
        // Second column duplicates the intercept.
        let rows: Vec<Vec<f64>> = (0..10).map(|_| vec![1.0, 1.0]).collect();
        let targets = vec![1.0; 10];

        assert!(least_squares(&rows, &targets).is_err());
    }

    #[test]
    fn test_percentile_band_ordering() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let low = percentile(&values, 1);
        let high = percentile(&values, 99);

        assert!(low < high);
        assert!(low >= 0.0);
        assert!(high <= 99.0);
    }
}
