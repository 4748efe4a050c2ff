//! Mock time-marching schemes for testing
//!
//! These schemes do no real integration, which makes them ideal for
//! isolating the discretization and boundary handling of the step driver
//! from any time-integration error.

use nalgebra::DMatrix;
use std::cell::RefCell;

use parab_rs::solver::{DiscretizedEquation, EquationGenerator, TimeMarchingScheme};

// =================================================================================================
// IdentityScheme
// =================================================================================================

/// Returns its input unchanged
///
/// Stepping with this scheme leaves the interior field exactly as it was,
/// so anything that changes in the output must come from the boundary
/// restoration.
pub struct IdentityScheme;

impl TimeMarchingScheme for IdentityScheme {
    fn march(
        &self,
        inner_values: &DMatrix<f64>,
        _t1: f64,
        _t2: f64,
        _equation: &EquationGenerator<'_>,
    ) -> Result<DMatrix<f64>, String> {
        Ok(inner_values.clone())
    }

    fn name(&self) -> &str {
        "Identity"
    }
}

// =================================================================================================
// ProbingScheme
// =================================================================================================

/// Evaluates the equation generator at a fixed time and records the result
///
/// Returns its input unchanged, like [`IdentityScheme`], but keeps the
/// `(A, r)` pair the step driver produced so tests can inspect the
/// discretized equation that a real scheme would have integrated.
pub struct ProbingScheme {
    /// Time at which to evaluate the equation generator
    pub probe_time: f64,

    /// The captured equation, filled in by `march`
    pub captured: RefCell<Option<DiscretizedEquation>>,

    /// The times the driver passed in, filled in by `march`
    pub seen_times: RefCell<Option<(f64, f64)>>,
}

impl ProbingScheme {
    pub fn new(probe_time: f64) -> Self {
        Self {
            probe_time,
            captured: RefCell::new(None),
            seen_times: RefCell::new(None),
        }
    }

    /// Take the captured equation out of the scheme
    pub fn take_captured(&self) -> DiscretizedEquation {
        self.captured
            .borrow_mut()
            .take()
            .expect("march was not called")
    }
}

impl TimeMarchingScheme for ProbingScheme {
    fn march(
        &self,
        inner_values: &DMatrix<f64>,
        t1: f64,
        t2: f64,
        equation: &EquationGenerator<'_>,
    ) -> Result<DMatrix<f64>, String> {
        *self.seen_times.borrow_mut() = Some((t1, t2));
        *self.captured.borrow_mut() = Some(equation(self.probe_time)?);
        Ok(inner_values.clone())
    }

    fn name(&self) -> &str {
        "Probing"
    }
}
