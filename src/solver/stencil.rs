//! Interior finite-difference stencil
//!
//! Builds the tridiagonal operator acting on the interior grid points from
//! the pointwise PDE coefficients, using second-order-consistent stencils
//! obtained by the method of undetermined coefficients. The grid may be
//! non-uniform: each interior point carries its own backward spacing `h0`
//! and forward spacing `h1`.
//!
//! # Derivation
//!
//! With `s = h0 + h1`, the second derivative at an interior point is
//! approximated by
//!
//! ```text
//! V_xx ≈ (2 / s) * ((V[+1] - V[0]) / h1 - (V[0] - V[-1]) / h0)
//! ```
//!
//! and the first derivative by the non-uniform central difference
//!
//! ```text
//! V_x ≈ (V[+1] - V[-1]) / s
//! ```
//!
//! Collecting the weights that multiply `V[-1]`, `V[0]`, `V[+1]` in
//! `-(a V_xx + b V_x + c V)` (the sign comes from moving the spatial terms
//! of `V_t + a V_xx + b V_x + c V = 0` to the right-hand side of
//! `dv/dt = A v`) gives the bands computed here. On a uniform grid of
//! spacing `h` they reduce to the classical
//!
//! ```text
//! upper = -(b/(2h) + a/h²)
//! lower =  b/(2h) - a/h²
//! diag  = -c + 2a/h²
//! ```

use nalgebra::{DMatrix, DVector};

use crate::solver::operator::TridiagonalOperator;

// =================================================================================================
// Stencil Builder
// =================================================================================================

/// Build the interior tridiagonal operator from pointwise coefficients
///
/// # Arguments
///
/// * `backward` - spacing toward the lower-index neighbor, one per interior
///   point (`deltas[..m]`)
/// * `forward` - spacing toward the higher-index neighbor, one per interior
///   point (`deltas[1..]`)
/// * `second_order` - `a(t, x)` at the interior points, `[batch, m]`
/// * `first_order` - `b(t, x)` at the interior points, `[batch, m]`
/// * `zeroth_order` - `c(t, x)` at the interior points, `[batch, m]`
///
/// Absent coefficients are passed as zero matrices; the corresponding
/// contributions vanish without special-casing.
///
/// Pure function of its inputs; boundary effects are folded in separately by
/// [`crate::solver::boundary::apply_boundary_conditions`].
///
/// # Panics
///
/// Panics when the coefficient shapes disagree with the spacing lengths;
/// the step driver always evaluates coefficients against the grid the
/// spacings came from.
pub fn build_interior_operator(
    backward: &DVector<f64>,
    forward: &DVector<f64>,
    second_order: &DMatrix<f64>,
    first_order: &DMatrix<f64>,
    zeroth_order: &DMatrix<f64>,
) -> TridiagonalOperator {
    let (batch, m) = second_order.shape();
    assert_eq!(backward.len(), m, "one backward spacing per interior point");
    assert_eq!(forward.len(), m, "one forward spacing per interior point");
    assert_eq!(first_order.shape(), (batch, m));
    assert_eq!(zeroth_order.shape(), (batch, m));

    let mut upper = DMatrix::zeros(batch, m);
    let mut lower = DMatrix::zeros(batch, m);
    let mut diagonal = DMatrix::zeros(batch, m);

    for j in 0..m {
        let h0 = backward[j];
        let h1 = forward[j];
        let s = h0 + h1;

        for k in 0..batch {
            let temp = 2.0 * second_order[(k, j)] / s;
            let dxx1 = temp / h1;
            let dxx2 = temp / h0;
            let dx = first_order[(k, j)] / s;

            let up = -(dx + dxx1);
            let lo = dx - dxx2;
            upper[(k, j)] = up;
            lower[(k, j)] = lo;
            diagonal[(k, j)] = -zeroth_order[(k, j)] - up - lo;
        }
    }

    TridiagonalOperator { diagonal, upper, lower }
}

// =================================================================================================
// Tests
// =================================================================================================
