//! Time-marching scheme interface
//!
//! The spatial discretization produces, for any time `t`, the interior
//! system `dv/dt = A(t) v + r(t)`. How that system is integrated across a
//! step is a separate concern with its own trade-offs (explicit vs implicit,
//! stability vs cost), so it sits behind a trait: the step driver builds the
//! equation generator and hands it to whatever scheme the caller supplies.
//!
//! # Stability
//!
//! The `TimeMarchingScheme` trait is the crate's extension seam. New schemes
//! are added by implementing it; the trait itself does not change.

use nalgebra::DMatrix;

use crate::solver::operator::DiscretizedEquation;

/// Generator of the discretized equation at a given time
///
/// Pure function of time: the step driver closes over the grid,
/// coefficients and boundary conditions, and evaluates them at whatever
/// instants the marching scheme asks for.
pub type EquationGenerator<'a> = dyn Fn(f64) -> Result<DiscretizedEquation, String> + 'a;

// =================================================================================================
// TimeMarchingScheme
// =================================================================================================

/// A method for integrating `dv/dt = A(t) v + r(t)` across one backward step
///
/// # Contract
///
/// - `inner_values` is the interior field (shape `[batch, m]`) at the later
///   time `t2`
/// - the returned field is the interior field at the earlier time `t1`,
///   with the same shape
/// - `t1 <= t2` always: the caller steps backward in time, and the ordering
///   of the two arguments carries that direction
/// - `equation` may be evaluated at any time in `[t1, t2]`, as often as the
///   scheme needs
///
/// Implementations hold no state across calls; the same scheme value can
/// drive many steps, including concurrently.
pub trait TimeMarchingScheme {
    /// Integrate the interior system from `t2` back to `t1`
    fn march(
        &self,
        inner_values: &DMatrix<f64>,
        t1: f64,
        t2: f64,
        equation: &EquationGenerator<'_>,
    ) -> Result<DMatrix<f64>, String>;

    /// Name of the scheme (used in diagnostics)
    fn name(&self) -> &str;
}
