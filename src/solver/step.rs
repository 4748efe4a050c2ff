//! One backward step of the parabolic PDE
//!
//! The step driver wires the pieces together: strip the boundary columns,
//! build the time-parametrized equation generator from the stencil builder
//! and the boundary injector, delegate the actual integration to the
//! caller-supplied marching scheme, then restore the boundary columns at the
//! new time from the integrated interior values.
//!
//! No state survives a call: grid deltas, operators and boundary rules are
//! rebuilt from the caller's inputs every time and dropped when the step
//! returns. Steps for different batches or different equations can therefore
//! run concurrently without coordination.

use nalgebra::DMatrix;

use crate::physics::boundary::BoundaryConditions;
use crate::physics::coefficients::{Coefficient, PdeCoefficients};
use crate::physics::grid::Grid1D;
use crate::solver::boundary::{apply_boundary_conditions, restore_boundary_values};
use crate::solver::stencil::build_interior_operator;
use crate::solver::traits::TimeMarchingScheme;

// =================================================================================================
// Step Driver
// =================================================================================================

/// Perform one backward time step of
/// `V_t + a(t,x) V_xx + b(t,x) V_x + c(t,x) V = 0`
///
/// # Arguments
///
/// * `time` - the later time `t0`, where `values` is given
/// * `next_time` - the earlier time `t1 <= t0` to step back to
/// * `grid` - the spatial grid (unchanged by the step)
/// * `values` - full solution field at `time`, shape `[batch, grid.len()]`,
///   boundary columns included
/// * `boundaries` - Robin conditions at the two edges
/// * `second_order_coeff` / `first_order_coeff` / `zeroth_order_coeff` -
///   the PDE coefficients; absent coefficients drop the corresponding term
/// * `scheme` - the externally supplied time-marching routine
///
/// Returns the full solution field at `next_time`, same shape as `values`.
///
/// # Time direction
///
/// The first supplied time is always the later one. Swapping the arguments
/// would silently invert the meaning of the returned field, so `next_time >
/// time` is rejected with an error instead of being reinterpreted.
/// `next_time == time` is allowed and only re-derives the boundary columns
/// at the same instant.
///
/// # Errors
///
/// Shape mismatches between `values` and the grid, broadcast failures from
/// coefficient or boundary functions, invalid boundary configurations
/// (`alpha` and `beta` both absent), violations of the time convention, and
/// any error the marching scheme reports.
#[allow(clippy::too_many_arguments)]
pub fn parabolic_equation_step(
    time: f64,
    next_time: f64,
    grid: &Grid1D,
    values: &DMatrix<f64>,
    boundaries: &BoundaryConditions,
    second_order_coeff: &Coefficient,
    first_order_coeff: &Coefficient,
    zeroth_order_coeff: &Coefficient,
    scheme: &dyn TimeMarchingScheme,
) -> Result<DMatrix<f64>, String> {
    let n = grid.len();
    let (batch, cols) = values.shape();

    if cols != n {
        return Err(format!(
            "Value field has {} columns but the grid has {} points",
            cols, n
        ));
    }
    if next_time > time {
        return Err(format!(
            "parabolic_equation_step integrates backward: next_time ({}) must not exceed time ({})",
            next_time, time
        ));
    }

    let inner_in = values.columns(1, n - 2).into_owned();
    let deltas = grid.deltas();
    let backward = deltas.rows(0, n - 2).into_owned();
    let forward = deltas.rows(1, n - 2).into_owned();

    let equation = |t: f64| {
        let second = second_order_coeff.evaluate_inner(t, grid, batch)?;
        let first = first_order_coeff.evaluate_inner(t, grid, batch)?;
        let zeroth = zeroth_order_coeff.evaluate_inner(t, grid, batch)?;

        let operator = build_interior_operator(&backward, &forward, &second, &first, &zeroth);
        apply_boundary_conditions(
            operator,
            &boundaries.lower.evaluate(t, grid),
            &boundaries.upper.evaluate(t, grid),
            &deltas,
        )
    };

    let inner_out = scheme.march(&inner_in, next_time, time, &equation)?;
    if inner_out.shape() != inner_in.shape() {
        return Err(format!(
            "Marching scheme '{}' returned shape {:?}, expected {:?}",
            scheme.name(),
            inner_out.shape(),
            inner_in.shape()
        ));
    }

    restore_boundary_values(&inner_out, boundaries, grid, &deltas, next_time)
}

// =================================================================================================
// ParabolicProblem
// =================================================================================================

/// A parabolic problem: grid, coefficients and boundary conditions together
///
/// # Design
///
/// This is the WHAT of a simulation: the same problem can be stepped with
/// different marching schemes, and the same scheme can step different
/// problems. [`ParabolicProblem::step`] is a convenience wrapper around
/// [`parabolic_equation_step`] for callers that keep the problem around
/// across an outer stepping loop.
///
/// # Example
///
/// ```rust
/// use parab_rs::physics::{Grid1D, Coefficient, PdeCoefficients, BoundaryConditions};
/// use parab_rs::solver::{ParabolicProblem, ThetaScheme};
/// use nalgebra::DMatrix;
///
/// let problem = ParabolicProblem::new(
///     Grid1D::uniform(0.0, 1.0, 21).unwrap(),
///     PdeCoefficients::diffusion(Coefficient::constant(0.01)),
///     BoundaryConditions::dirichlet(0.0, 0.0),
/// );
///
/// let values = DMatrix::zeros(1, 21);
/// let scheme = ThetaScheme::crank_nicolson();
/// let stepped = problem.step(&values, 1.0, 0.9, &scheme).unwrap();
/// assert_eq!(stepped.shape(), (1, 21));
/// ```
#[derive(Debug)]
pub struct ParabolicProblem {
    /// Spatial grid
    pub grid: Grid1D,

    /// PDE coefficients
    pub coefficients: PdeCoefficients,

    /// Edge conditions
    pub boundaries: BoundaryConditions,
}

impl ParabolicProblem {
    /// Bundle a problem definition
    pub fn new(grid: Grid1D, coefficients: PdeCoefficients, boundaries: BoundaryConditions) -> Self {
        Self { grid, coefficients, boundaries }
    }

    /// Step the problem's solution field backward from `time` to `next_time`
    pub fn step(
        &self,
        values: &DMatrix<f64>,
        time: f64,
        next_time: f64,
        scheme: &dyn TimeMarchingScheme,
    ) -> Result<DMatrix<f64>, String> {
        parabolic_equation_step(
            time,
            next_time,
            &self.grid,
            values,
            &self.boundaries,
            &self.coefficients.second_order,
            &self.coefficients.first_order,
            &self.coefficients.zeroth_order,
            scheme,
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
