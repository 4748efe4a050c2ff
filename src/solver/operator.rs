//! Discretized equation types
//!
//! The space-discretized PDE over the interior grid points has the form
//!
//! ```text
//! dv/dt = A(t) v(t) + r(t)
//! ```
//!
//! where `A` is tridiagonal and `r` is the inhomogeneous term introduced by
//! the boundary conditions. This module provides the named containers for
//! both, with their shape invariants enforced at construction.

use nalgebra::DMatrix;

// =================================================================================================
// TridiagonalOperator
// =================================================================================================

/// Batched tridiagonal operator over interior grid points
///
/// Three `[batch, m]` matrices, one batched band each. Row `k` of the three
/// matrices together describe the tridiagonal matrix acting on batch entry
/// `k`. For interior index `j`:
///
/// ```text
/// (A v)[j] = lower[j] * v[j-1] + diagonal[j] * v[j] + upper[j] * v[j+1]
/// ```
///
/// with the out-of-range neighbors at `j = 0` and `j = m-1` absent: the
/// boundary coupling they would represent has already been folded into the
/// diagonal and the inhomogeneous term by the boundary machinery.
///
/// # Invariant
///
/// All three bands have identical shape; enforced by [`TridiagonalOperator::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalOperator {
    /// Main diagonal, `[batch, m]`
    pub diagonal: DMatrix<f64>,

    /// Coupling to the `+1` neighbor; the last column is unused
    pub upper: DMatrix<f64>,

    /// Coupling to the `-1` neighbor; the first column is unused
    pub lower: DMatrix<f64>,
}

impl TridiagonalOperator {
    /// Create an operator, enforcing the equal-shape invariant
    pub fn new(
        diagonal: DMatrix<f64>,
        upper: DMatrix<f64>,
        lower: DMatrix<f64>,
    ) -> Result<Self, String> {
        if diagonal.shape() != upper.shape() || diagonal.shape() != lower.shape() {
            return Err(format!(
                "Tridiagonal bands must have identical shapes, got diagonal {:?}, upper {:?}, lower {:?}",
                diagonal.shape(),
                upper.shape(),
                lower.shape()
            ));
        }
        Ok(Self { diagonal, upper, lower })
    }

    /// Shape `(batch, m)` shared by the three bands
    pub fn shape(&self) -> (usize, usize) {
        self.diagonal.shape()
    }

    /// Apply the operator: compute `A v` for each batch row
    ///
    /// # Panics
    ///
    /// Panics when `v` does not match the operator's shape; callers inside
    /// this crate always pass the interior field the operator was built for.
    pub fn apply(&self, v: &DMatrix<f64>) -> DMatrix<f64> {
        assert_eq!(
            v.shape(),
            self.shape(),
            "operand shape must match operator shape"
        );

        let (batch, m) = self.shape();
        DMatrix::from_fn(batch, m, |k, j| {
            let mut sum = self.diagonal[(k, j)] * v[(k, j)];
            if j > 0 {
                sum += self.lower[(k, j)] * v[(k, j - 1)];
            }
            if j + 1 < m {
                sum += self.upper[(k, j)] * v[(k, j + 1)];
            }
            sum
        })
    }
}

// =================================================================================================
// DiscretizedEquation
// =================================================================================================

/// The full interior system `dv/dt = A v + r` at one instant
#[derive(Debug, Clone)]
pub struct DiscretizedEquation {
    /// Tridiagonal operator `A`
    pub operator: TridiagonalOperator,

    /// Inhomogeneous term `r`, same shape as the operator bands
    pub inhomogeneity: DMatrix<f64>,
}

impl DiscretizedEquation {
    /// Pair an operator with its inhomogeneous term, checking shapes
    pub fn new(operator: TridiagonalOperator, inhomogeneity: DMatrix<f64>) -> Result<Self, String> {
        if inhomogeneity.shape() != operator.shape() {
            return Err(format!(
                "Inhomogeneous term shape {:?} must match operator shape {:?}",
                inhomogeneity.shape(),
                operator.shape()
            ));
        }
        Ok(Self { operator, inhomogeneity })
    }

    /// Evaluate the right-hand side `A v + r`
    pub fn rhs(&self, v: &DMatrix<f64>) -> DMatrix<f64> {
        self.operator.apply(v) + &self.inhomogeneity
    }
}

// =================================================================================================
// Tests
// =================================================================================================
