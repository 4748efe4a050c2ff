//! Spatial discretization and time stepping
//!
//! This module is the HOW of the crate: it turns the continuous problem
//! described by [`crate::physics`] into the discrete interior system
//! `dv/dt = A(t) v + r(t)` and steps it backward in time.
//!
//! # Pipeline of one step
//!
//! ```text
//! ┌─────────────────┐
//! │ full value grid │  [batch, N]
//! └────────┬────────┘
//!          │ strip boundary columns
//! ┌────────▼────────┐     ┌──────────────────────┐
//! │ interior field  │     │ stencil builder      │ ← PDE coefficients
//! │ [batch, N-2]    │     │ (interior bands)     │
//! └────────┬────────┘     └─────────┬────────────┘
//!          │                        │
//!          │              ┌─────────▼────────────┐
//!          │              │ boundary injector    │ ← Robin conditions
//!          │              │ → (A(t), r(t))       │
//!          │              └─────────┬────────────┘
//!          │                        │
//! ┌────────▼────────────────────────▼───┐
//! │ time-marching scheme (trait object) │
//! └────────┬────────────────────────────┘
//!          │ interior field at next_time
//! ┌────────▼────────────┐
//! │ boundary restorer   │ → full value grid at next_time
//! └─────────────────────┘
//! ```
//!
//! Every box is a pure function of its inputs; the only sequential
//! dependency is inside the marching scheme itself.
//!
//! # Module Organization
//!
//! - **`operator`**: [`TridiagonalOperator`], [`DiscretizedEquation`]
//! - **`stencil`**: interior bands from pointwise coefficients
//! - **`boundary`**: Robin discretization, operator corrections, boundary
//!   restoration
//! - **`traits`**: the [`TimeMarchingScheme`] seam
//! - **`step`**: [`parabolic_equation_step`] and [`ParabolicProblem`]
//! - **`methods`**: concrete schemes ([`ThetaScheme`]) and the batched
//!   tridiagonal solve

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod boundary;
pub mod methods;
pub mod operator;
pub mod stencil;
pub mod step;
pub mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand work off to Rayon is a numerical-execution
// concern, so it lives here rather than in physics/. The batched
// tridiagonal solve consults this threshold before dispatching batch rows
// to the thread pool.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (useful in benchmarks and tests) without requiring a mutex on
// every solve. Relaxed ordering is sufficient: the value is a performance
// hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of elements (batch rows × interior points) above which the
/// tridiagonal solve switches to parallel iteration over batch rows.
///
/// Below this point the overhead of Rayon's thread-pool dispatch outweighs
/// the per-row work of a Thomas sweep.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The batched tridiagonal solve iterates sequentially when the system
/// contains fewer elements than this value and switches to Rayon when it
/// contains more — but only when the crate is compiled with the `parallel`
/// feature.
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`, which would force parallel dispatch on
/// every single-element solve.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Prevents one test from leaking a modified threshold into the
/// next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring to any value never
        // panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::{
    apply_boundary_conditions, discretize_boundary_condition, restore_boundary_values,
    ExtrapolationRule,
};
pub use methods::{solve_tridiagonal_systems, ThetaScheme};
pub use operator::{DiscretizedEquation, TridiagonalOperator};
pub use stencil::build_interior_operator;
pub use step::{parabolic_equation_step, ParabolicProblem};
pub use traits::{EquationGenerator, TimeMarchingScheme};

// =================================================================================================
// Helper Functions
// =================================================================================================

use nalgebra::DMatrix;

/// Validate a value field for numerical issues
///
/// Checks that the field contains no NaN or Inf entries, which would
/// indicate numerical instability (a step size against the explicit
/// scheme's restriction, an ill-posed coefficient) rather than a
/// configuration error.
///
/// # Returns
///
/// `Ok(())` if the field is clean, `Err(msg)` with diagnostic information
/// otherwise.
pub fn validate_values(values: &DMatrix<f64>, context: &str) -> Result<(), String> {
    for (idx, &x) in values.iter().enumerate() {
        if x.is_nan() {
            let (batch, _) = values.shape();
            return Err(format!(
                "NaN detected in {} (entry {} of batch row {}). This indicates numerical \
                 instability; try a smaller step or an implicit scheme.",
                context,
                idx / batch,
                idx % batch
            ));
        }
        if x.is_infinite() {
            let (batch, _) = values.shape();
            return Err(format!(
                "Infinity detected in {} (entry {} of batch row {}). This indicates numerical \
                 overflow; check the coefficients and the step size.",
                context,
                idx / batch,
                idx % batch
            ));
        }
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
