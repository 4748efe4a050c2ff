//! One-dimensional spatial grids
//!
//! The grid is the backbone of the spatial discretization: an ordered
//! sequence of strictly increasing coordinates. Grids may be non-uniform:
//! the stencil builder in [`crate::solver`] handles arbitrary spacings with
//! second-order accuracy, so refining the grid near a region of interest (a
//! payoff kink, a boundary layer) costs nothing in code.
//!
//! # Example
//!
//! ```rust
//! use parab_rs::physics::Grid1D;
//!
//! // Uniform grid on [0, 1] with 101 points
//! let grid = Grid1D::uniform(0.0, 1.0, 101).unwrap();
//! assert_eq!(grid.len(), 101);
//!
//! // Geometric grid on [1, 100]: spacings grow by a constant ratio
//! let log_grid = Grid1D::log_uniform(1.0, 100.0, 51).unwrap();
//! assert!(log_grid.deltas()[0] < log_grid.deltas()[49]);
//! ```

use nalgebra::DVector;

// =================================================================================================
// Grid1D
// =================================================================================================

/// Ordered one-dimensional grid of strictly increasing coordinates
///
/// # Invariants
///
/// - At least 4 points: two boundary points and two interior points. The
///   boundary extrapolation is a two-point rule, so one interior point is
///   not enough to close the discretization.
/// - Coordinates strictly increasing and finite
///
/// Both invariants are enforced at construction, so downstream code never
/// re-validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    coords: DVector<f64>,
}

impl Grid1D {
    // ======================================= Constructors ======================================

    /// Create a grid from raw coordinates, validating the invariants
    ///
    /// # Errors
    ///
    /// Returns an error when fewer than 4 points are supplied, when any
    /// coordinate is not finite, or when the sequence is not strictly
    /// increasing.
    pub fn from_vec(coords: Vec<f64>) -> Result<Self, String> {
        if coords.len() < 4 {
            return Err(format!(
                "Grid must contain at least 4 points (2 boundary + 2 interior), got {}",
                coords.len()
            ));
        }

        for (i, &x) in coords.iter().enumerate() {
            if !x.is_finite() {
                return Err(format!("Grid coordinate {} is not finite: {}", i, x));
            }
        }

        for i in 1..coords.len() {
            if coords[i] <= coords[i - 1] {
                return Err(format!(
                    "Grid coordinates must be strictly increasing: coords[{}] = {} <= coords[{}] = {}",
                    i, coords[i], i - 1, coords[i - 1]
                ));
            }
        }

        Ok(Self { coords: DVector::from_vec(coords) })
    }

    /// Create a uniform grid of `n` points on `[lower, upper]`
    pub fn uniform(lower: f64, upper: f64, n: usize) -> Result<Self, String> {
        if n < 4 {
            return Err(format!("Uniform grid needs at least 4 points, got {}", n));
        }
        if !(upper > lower) {
            return Err(format!(
                "Uniform grid needs upper > lower, got [{}, {}]",
                lower, upper
            ));
        }

        let h = (upper - lower) / (n - 1) as f64;
        let mut coords: Vec<f64> = (0..n).map(|i| lower + h * i as f64).collect();
        // Land exactly on the endpoint regardless of rounding in the sum.
        coords[n - 1] = upper;

        Self::from_vec(coords)
    }

    /// Create a geometrically spaced grid of `n` points on `[lower, upper]`
    ///
    /// Points are uniform in `ln(x)`, so spacings grow proportionally to the
    /// coordinate. Requires `lower > 0`. Commonly used for price grids where
    /// relative resolution matters more than absolute resolution.
    pub fn log_uniform(lower: f64, upper: f64, n: usize) -> Result<Self, String> {
        if !(lower > 0.0) {
            return Err(format!("Log-uniform grid needs lower > 0, got {}", lower));
        }
        if n < 4 {
            return Err(format!("Log-uniform grid needs at least 4 points, got {}", n));
        }
        if !(upper > lower) {
            return Err(format!(
                "Log-uniform grid needs upper > lower, got [{}, {}]",
                lower, upper
            ));
        }

        let (log_lo, log_hi) = (lower.ln(), upper.ln());
        let h = (log_hi - log_lo) / (n - 1) as f64;
        let mut coords: Vec<f64> = (0..n).map(|i| (log_lo + h * i as f64).exp()).collect();
        coords[0] = lower;
        coords[n - 1] = upper;

        Self::from_vec(coords)
    }

    // ========================================== Queries =========================================

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// A grid is never empty (the constructor requires 4 points), kept for
    /// API symmetry with the standard collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The coordinates
    pub fn coords(&self) -> &DVector<f64> {
        &self.coords
    }

    /// Coordinate of the lower boundary point
    pub fn lower(&self) -> f64 {
        self.coords[0]
    }

    /// Coordinate of the upper boundary point
    pub fn upper(&self) -> f64 {
        self.coords[self.coords.len() - 1]
    }

    /// Consecutive spacings `x[i+1] - x[i]`, length `len() - 1`
    ///
    /// All spacings are positive by the construction invariant.
    pub fn deltas(&self) -> DVector<f64> {
        let n = self.coords.len();
        DVector::from_fn(n - 1, |i, _| self.coords[i + 1] - self.coords[i])
    }

    /// Number of interior points, `len() - 2`
    pub fn interior_len(&self) -> usize {
        self.coords.len() - 2
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_valid() {
        let grid = Grid1D::from_vec(vec![0.0, 0.5, 2.0, 3.5]).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.interior_len(), 2);
        assert_eq!(grid.lower(), 0.0);
        assert_eq!(grid.upper(), 3.5);
    }

    #[test]
    fn test_from_vec_too_short() {
        let result = Grid1D::from_vec(vec![0.0, 1.0, 2.0]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("at least 4 points"));
    }

    #[test]
    fn test_from_vec_not_increasing() {
        let result = Grid1D::from_vec(vec![0.0, 1.0, 1.0, 2.0]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("strictly increasing"));
    }

    #[test]
    fn test_from_vec_not_finite() {
        let result = Grid1D::from_vec(vec![0.0, 1.0, f64::NAN, 3.0]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not finite"));
    }

    #[test]
    fn test_uniform_spacings() {
        let grid = Grid1D::uniform(0.0, 1.0, 11).unwrap();
        let deltas = grid.deltas();
        assert_eq!(deltas.len(), 10);
        for i in 0..10 {
            assert!((deltas[i] - 0.1).abs() < 1e-12);
        }
        assert_eq!(grid.upper(), 1.0);
    }

    #[test]
    fn test_uniform_rejects_bad_interval() {
        assert!(Grid1D::uniform(1.0, 1.0, 10).is_err());
        assert!(Grid1D::uniform(2.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_log_uniform_endpoints_and_growth() {
        let grid = Grid1D::log_uniform(1.0, 100.0, 21).unwrap();
        assert_eq!(grid.lower(), 1.0);
        assert_eq!(grid.upper(), 100.0);

        // Spacings grow by a constant ratio on a log-uniform grid
        let deltas = grid.deltas();
        let ratio = deltas[1] / deltas[0];
        for i in 1..deltas.len() {
            assert!((deltas[i] / deltas[i - 1] - ratio).abs() < 1e-9);
        }
    }

    #[test]
    fn test_log_uniform_rejects_nonpositive_lower() {
        assert!(Grid1D::log_uniform(0.0, 1.0, 5).is_err());
        assert!(Grid1D::log_uniform(-1.0, 1.0, 5).is_err());
    }
}
