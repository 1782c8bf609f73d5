//! Scalar statistics shared by the analyzer and evaluator.
//!
//! Everything here is deterministic and total: degenerate inputs (empty
//! slices, zero variance, mismatched lengths) produce neutral values instead
//! of errors, so callers can profile arbitrary series without pre-validation.

use nalgebra::{DMatrix, DVector};

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// max − min; 0 for an empty slice.
pub fn value_range(values: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min <= max { max - min } else { 0.0 }
}

/// Pearson correlation coefficient.
///
/// Returns 0 for empty or length-mismatched inputs, and 0 when either series
/// is constant (zero denominator).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();
    let sum_yy: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_xx - sum_x * sum_x) * (n * sum_yy - sum_y * sum_y)).sqrt();

    if denominator == 0.0 { 0.0 } else { numerator / denominator }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Ordinary least squares line of `values` against the sequential index
/// `0..n`, solved as a two-column design problem.
///
/// Returns `(slope, r_squared)`, or `None` below 2 points or when the solve
/// degenerates.
pub fn index_line_fit(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, &v) in values.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = i as f64;
        y[i] = v;
    }

    let beta = solve_least_squares(&design, &y)?;
    let slope = beta[1];

    let index: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let r = pearson_correlation(&index, values);
    Some((slope, r * r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_of_known_values() {
        // var([2,4,4,4,5,5,7,9]) = 4 (population).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_variance(&values) - 4.0).abs() < 1e-12);
        assert!((std_dev(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn range_and_mean_of_empty_slice_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(value_range(&[]), 0.0);
        assert_eq!(population_variance(&[]), 0.0);
    }

    #[test]
    fn correlation_is_symmetric() {
        let x = [1.0, 3.0, 2.0, 8.0, 5.0, -1.0];
        let y = [0.5, 2.5, 1.0, 9.0, 4.5, 0.0];
        assert_eq!(pearson_correlation(&x, &y), pearson_correlation(&y, &x));
    }

    #[test]
    fn correlation_of_perfect_line_is_one() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [5.0, 7.0, 9.0, 11.0];
        assert!((pearson_correlation(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_constant_series_is_zero() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 4.0, 4.0];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
    }

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2].
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn index_line_fit_recovers_slope() {
        let values: Vec<f64> = (0..20).map(|i| 10.0 + 1.5 * i as f64).collect();
        let (slope, r2) = index_line_fit(&values).unwrap();
        assert!((slope - 1.5).abs() < 1e-9);
        assert!((r2 - 1.0).abs() < 1e-9);
    }
}
