//! Helper functions for integration tests

use nalgebra::DMatrix;

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Largest absolute entry-wise difference between two matrices
pub fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    assert_eq!(a.shape(), b.shape(), "shape mismatch");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Assert that two matrices agree entry-wise within a tolerance
pub fn assert_matrices_close(a: &DMatrix<f64>, b: &DMatrix<f64>, tolerance: f64, message: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", message);

    for k in 0..a.nrows() {
        for j in 0..a.ncols() {
            let diff = (a[(k, j)] - b[(k, j)]).abs();
            assert!(
                diff < tolerance,
                "{}: entry ({}, {}) differs by {} (tolerance {})",
                message,
                k,
                j,
                diff,
                tolerance
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_max_abs_diff() {
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let b = DMatrix::from_row_slice(1, 2, &[1.5, 2.0]);
        assert!((max_abs_diff(&a, &b) - 0.5).abs() < 1e-12);
    }
}
