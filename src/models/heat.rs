//! Heat equation
//!
//! `V_t + κ V_xx = 0` stepped backward in time is the plain heat equation:
//! stepping from `t0` down to `t1` diffuses the profile by an elapsed time
//! of `t0 - t1`. The sine modes of the Dirichlet problem on `[0, L]` decay
//! with known rates, which makes this the reference problem for accuracy
//! tests.

use nalgebra::DVector;
use std::f64::consts::PI;

use crate::physics::boundary::BoundaryConditions;
use crate::physics::coefficients::{Coefficient, PdeCoefficients};
use crate::physics::grid::Grid1D;
use crate::solver::step::ParabolicProblem;

// =================================================================================================
// HeatEquation
// =================================================================================================

/// Constant-diffusivity heat equation `V_t + κ V_xx = 0`
///
/// # Example
///
/// ```rust
/// use parab_rs::models::HeatEquation;
/// use parab_rs::physics::{Grid1D, BoundaryConditions};
///
/// let model = HeatEquation::new(0.1);
/// let grid = Grid1D::uniform(0.0, 1.0, 51).unwrap();
/// let problem = model.problem(grid, BoundaryConditions::dirichlet(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeatEquation {
    /// Diffusivity `κ` (must be positive for the problem to be parabolic)
    pub diffusivity: f64,
}

impl HeatEquation {
    /// Create a heat equation with diffusivity `κ`
    pub fn new(diffusivity: f64) -> Self {
        Self { diffusivity }
    }

    /// The PDE coefficients: `a = κ`, no drift, no zeroth-order term
    pub fn coefficients(&self) -> PdeCoefficients {
        PdeCoefficients::diffusion(Coefficient::constant(self.diffusivity))
    }

    /// Assemble a full problem on the given grid
    pub fn problem(&self, grid: Grid1D, boundaries: BoundaryConditions) -> ParabolicProblem {
        ParabolicProblem::new(grid, self.coefficients(), boundaries)
    }

    // ======================================== Analytics =========================================

    /// Sample the `mode`-th sine eigenmode of the Dirichlet problem on the
    /// grid's interval: `sin(mode * π * (x - lower) / L)`
    pub fn sine_mode(&self, grid: &Grid1D, mode: usize) -> DVector<f64> {
        let length = grid.upper() - grid.lower();
        let lower = grid.lower();
        grid.coords()
            .map(|x| (mode as f64 * PI * (x - lower) / length).sin())
    }

    /// Decay factor of the `mode`-th sine eigenmode after diffusing for
    /// `elapsed` time on an interval of length `length`
    ///
    /// Stepping backward from `t0` to `t1` corresponds to
    /// `elapsed = t0 - t1`.
    pub fn decay_factor(&self, length: f64, mode: usize, elapsed: f64) -> f64 {
        let rate = self.diffusivity * (mode as f64 * PI / length).powi(2);
        (-rate * elapsed).exp()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
