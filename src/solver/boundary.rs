//! Boundary discretization
//!
//! Converts the Robin condition `alpha*V + beta*V_n = gamma` at one edge
//! into the two-point extrapolation rule
//!
//! ```text
//! v0 = xi1 * v1 + xi2 * v2 + eta
//! ```
//!
//! where `v0` is the boundary value and `v1`, `v2` the two nearest interior
//! values, and folds that rule into the interior tridiagonal operator. The
//! rule comes from fitting a quadratic through the boundary point and the
//! two interior points, consistent with the normal-derivative condition, so
//! the boundary treatment does not degrade the interior scheme's
//! second-order accuracy.
//!
//! Three entry points, used together by the step driver:
//!
//! - [`discretize_boundary_condition`] — one edge's `(xi1, xi2, eta)`
//! - [`apply_boundary_conditions`] — fold both edges into the operator,
//!   producing the final `(A, r)` handed to time marching
//! - [`restore_boundary_values`] — rebuild the boundary values from the
//!   integrated interior field after a step

use nalgebra::{DMatrix, DVector};

use crate::physics::boundary::{BoundaryConditions, RobinCoeffs};
use crate::physics::grid::Grid1D;
use crate::solver::operator::{DiscretizedEquation, TridiagonalOperator};

// =================================================================================================
// ExtrapolationRule
// =================================================================================================

/// Discretized form of one edge's boundary condition
///
/// One entry per batch row: `boundary = xi1 * v1 + xi2 * v2 + eta` with
/// `v1` the nearest interior value and `v2` the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrapolationRule {
    /// Weight of the nearest interior value
    pub xi1: DVector<f64>,

    /// Weight of the second-nearest interior value
    pub xi2: DVector<f64>,

    /// Inhomogeneous part
    pub eta: DVector<f64>,
}

impl ExtrapolationRule {
    /// Evaluate the rule against the two nearest interior columns
    pub fn extrapolate(&self, v1: &DVector<f64>, v2: &DVector<f64>) -> DVector<f64> {
        DVector::from_fn(self.xi1.len(), |k, _| {
            self.xi1[k] * v1[k] + self.xi2[k] * v2[k] + self.eta[k]
        })
    }
}

// =================================================================================================
// Boundary Discretizer
// =================================================================================================

/// Discretize one edge's Robin condition into an [`ExtrapolationRule`]
///
/// # Arguments
///
/// * `dx0` - distance from the boundary point to the nearest interior point
/// * `dx1` - distance from that point to the next interior point
/// * `condition` - the `(alpha, beta, gamma)` triple at this edge and instant
/// * `batch` - number of batch rows to broadcast the rule over
///
/// The formulas are identical at both edges; the caller passes the mirrored
/// spacings for the upper edge.
///
/// # Errors
///
/// Configuration error when `alpha` and `beta` are both absent, broadcast
/// error when a per-batch edge value does not match `batch`.
pub fn discretize_boundary_condition(
    dx0: f64,
    dx1: f64,
    condition: &RobinCoeffs,
    batch: usize,
) -> Result<ExtrapolationRule, String> {
    condition.validate()?;

    let gamma = condition.gamma.broadcast_to(batch)?;

    let beta = match &condition.beta {
        None => {
            // Dirichlet: the boundary value is pinned, no interior coupling.
            // validate() above guarantees alpha is present.
            let alpha = condition.alpha.as_ref().unwrap().broadcast_to(batch)?;
            return Ok(ExtrapolationRule {
                xi1: DVector::zeros(batch),
                xi2: DVector::zeros(batch),
                eta: gamma.component_div(&alpha),
            });
        }
        Some(beta) => beta.broadcast_to(batch)?,
    };

    // General Robin/Neumann: one-sided quadratic extrapolation consistent
    // with the normal-derivative condition.
    let mut denom = DVector::from_fn(batch, |k, _| beta[k] * dx1 * (2.0 * dx0 + dx1));
    if let Some(alpha) = &condition.alpha {
        let alpha = alpha.broadcast_to(batch)?;
        for k in 0..batch {
            denom[k] += alpha[k] * dx0 * dx1 * (dx0 + dx1);
        }
    }

    let sum = dx0 + dx1;
    Ok(ExtrapolationRule {
        xi1: DVector::from_fn(batch, |k, _| beta[k] * sum * sum / denom[k]),
        xi2: DVector::from_fn(batch, |k, _| -beta[k] * dx0 * dx0 / denom[k]),
        eta: DVector::from_fn(batch, |k, _| gamma[k] * dx0 * dx1 * sum / denom[k]),
    })
}

// =================================================================================================
// Boundary Injector
// =================================================================================================

/// Fold both edges' conditions into the interior operator
///
/// Produces the final `(A, r)` pair defining `dv/dt = A v + r` over the
/// interior points.
///
/// # Fast path
///
/// With pure Dirichlet conditions at both edges the boundary values are
/// fixed numbers, so the tridiagonal structure is untouched and only the
/// first and last entries of `r` pick up the known neighbor contributions
/// `lower[.., 0] * gamma_l / alpha_l` and `upper[.., last] * gamma_u / alpha_u`.
///
/// # General path
///
/// With a Robin or Neumann condition at either edge, the boundary value is a
/// linear function of the two nearest interior values. Substituting the
/// extrapolation rule into the first interior row turns the row's coupling
/// to the boundary into corrections of its own diagonal and off-diagonal:
///
/// ```text
/// diagonal[.., 0] += lower[.., 0] * xi1     upper[.., 0] += lower[.., 0] * xi2
/// r[.., 0] = lower[.., 0] * eta
/// ```
///
/// and symmetrically at the upper edge through `upper[.., last]`.
pub fn apply_boundary_conditions(
    operator: TridiagonalOperator,
    lower_condition: &RobinCoeffs,
    upper_condition: &RobinCoeffs,
    deltas: &DVector<f64>,
) -> Result<DiscretizedEquation, String> {
    let (batch, m) = operator.shape();
    let last = m - 1;

    if lower_condition.is_dirichlet() && upper_condition.is_dirichlet() {
        lower_condition.validate()?;
        upper_condition.validate()?;

        let gamma_l = lower_condition.gamma.broadcast_to(batch)?;
        let alpha_l = lower_condition.alpha.as_ref().unwrap().broadcast_to(batch)?;
        let gamma_u = upper_condition.gamma.broadcast_to(batch)?;
        let alpha_u = upper_condition.alpha.as_ref().unwrap().broadcast_to(batch)?;

        let mut inhomogeneity = DMatrix::zeros(batch, m);
        for k in 0..batch {
            inhomogeneity[(k, 0)] = operator.lower[(k, 0)] * gamma_l[k] / alpha_l[k];
            inhomogeneity[(k, last)] = operator.upper[(k, last)] * gamma_u[k] / alpha_u[k];
        }

        return DiscretizedEquation::new(operator, inhomogeneity);
    }

    let n_deltas = deltas.len();
    let rule_lower = discretize_boundary_condition(deltas[0], deltas[1], lower_condition, batch)?;
    let rule_upper = discretize_boundary_condition(
        deltas[n_deltas - 1],
        deltas[n_deltas - 2],
        upper_condition,
        batch,
    )?;

    let mut operator = operator;
    let mut inhomogeneity = DMatrix::zeros(batch, m);

    for k in 0..batch {
        let coupling_l = operator.lower[(k, 0)];
        operator.diagonal[(k, 0)] += coupling_l * rule_lower.xi1[k];
        operator.upper[(k, 0)] += coupling_l * rule_lower.xi2[k];
        inhomogeneity[(k, 0)] = coupling_l * rule_lower.eta[k];

        let coupling_u = operator.upper[(k, last)];
        operator.diagonal[(k, last)] += coupling_u * rule_upper.xi1[k];
        operator.lower[(k, last)] += coupling_u * rule_upper.xi2[k];
        inhomogeneity[(k, last)] = coupling_u * rule_upper.eta[k];
    }

    DiscretizedEquation::new(operator, inhomogeneity)
}

// =================================================================================================
// Post-step boundary restoration
// =================================================================================================

/// Rebuild the two boundary columns from the integrated interior field
///
/// Evaluates both boundary conditions at the new time, discretizes them
/// against the edge spacings, and extrapolates the boundary values from the
/// two nearest interior columns. Returns the full `[batch, grid.len()]`
/// field.
pub fn restore_boundary_values(
    inner: &DMatrix<f64>,
    boundaries: &BoundaryConditions,
    grid: &Grid1D,
    deltas: &DVector<f64>,
    t: f64,
) -> Result<DMatrix<f64>, String> {
    let (batch, m) = inner.shape();
    let n_deltas = deltas.len();

    let rule_lower = discretize_boundary_condition(
        deltas[0],
        deltas[1],
        &boundaries.lower.evaluate(t, grid),
        batch,
    )?;
    let rule_upper = discretize_boundary_condition(
        deltas[n_deltas - 1],
        deltas[n_deltas - 2],
        &boundaries.upper.evaluate(t, grid),
        batch,
    )?;

    let first = rule_lower.extrapolate(
        &inner.column(0).into_owned(),
        &inner.column(1).into_owned(),
    );
    let last = rule_upper.extrapolate(
        &inner.column(m - 1).into_owned(),
        &inner.column(m - 2).into_owned(),
    );

    let mut full = DMatrix::zeros(batch, m + 2);
    for k in 0..batch {
        full[(k, 0)] = first[k];
        for j in 0..m {
            full[(k, j + 1)] = inner[(k, j)];
        }
        full[(k, m + 1)] = last[k];
    }
    Ok(full)
}

// =================================================================================================
// Tests
// =================================================================================================
