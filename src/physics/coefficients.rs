//! PDE coefficient functions
//!
//! The equation `V_t + a(t,x) V_xx + b(t,x) V_x + c(t,x) V = 0` is described
//! by up to three coefficient functions of time and grid. Any of them may be
//! absent, which means the corresponding term is simply not in the equation.
//!
//! # Absence is a variant, not a null
//!
//! An absent coefficient is the [`Coefficient::Absent`] variant. It is
//! consumed as the zero function at the single point where coefficients are
//! evaluated. It never travels through the arithmetic as an `Option` that
//! every call site must remember to unwrap.
//!
//! # Example
//!
//! ```rust
//! use parab_rs::physics::{Coefficient, CoeffValue, Grid1D, PdeCoefficients};
//!
//! // Heat equation V_t + k V_xx = 0: only the second-order term is present
//! let coeffs = PdeCoefficients::diffusion(Coefficient::constant(0.1));
//! assert!(coeffs.first_order.is_absent());
//!
//! // Space-dependent coefficient a(t, x) = x^2 / 2
//! let a = Coefficient::from_fn(|_t, grid| {
//!     CoeffValue::from_profile(grid.coords().map(|x| 0.5 * x * x))
//! });
//! let grid = Grid1D::uniform(0.0, 1.0, 11).unwrap();
//! let inner = a.evaluate_inner(0.0, &grid, 2).unwrap();
//! assert_eq!(inner.shape(), (2, 9));
//! ```

use nalgebra::DMatrix;

use crate::physics::data::CoeffValue;
use crate::physics::grid::Grid1D;

/// Signature of a coefficient function: `(time, grid) -> values`
pub type CoeffFn = Box<dyn Fn(f64, &Grid1D) -> CoeffValue + Send + Sync>;

// =================================================================================================
// Coefficient
// =================================================================================================

/// A PDE coefficient: either absent or a function of `(time, grid)`
///
/// # Design
///
/// Tagged variant rather than `Option<CoeffFn>`: absence is part of the
/// coefficient's meaning (the term is not in the equation), so it deserves a
/// name, and evaluation treats it uniformly as the zero function.
pub enum Coefficient {
    /// The term is not present in the equation
    Absent,

    /// Pointwise coefficient values as a function of time and grid
    Function(CoeffFn),
}

impl Coefficient {
    // ======================================= Constructors ======================================

    /// The absent coefficient (the term is dropped from the equation)
    pub fn absent() -> Self {
        Self::Absent
    }

    /// A coefficient that is the same constant at every time and point
    pub fn constant(value: f64) -> Self {
        Self::Function(Box::new(move |_t, _grid| CoeffValue::Scalar(value)))
    }

    /// A coefficient defined by an arbitrary function of `(time, grid)`
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64, &Grid1D) -> CoeffValue + Send + Sync + 'static,
    {
        Self::Function(Box::new(f))
    }

    // ========================================== Queries =========================================

    /// Check whether the term is absent from the equation
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    // ======================================== Evaluation ========================================

    /// Evaluate over the full grid and broadcast to `[batch, grid.len()]`
    ///
    /// `Absent` evaluates to the zero matrix.
    pub fn evaluate(&self, t: f64, grid: &Grid1D, batch: usize) -> Result<DMatrix<f64>, String> {
        match self {
            Coefficient::Absent => Ok(DMatrix::zeros(batch, grid.len())),
            Coefficient::Function(f) => f(t, grid).broadcast_to(batch, grid.len()),
        }
    }

    /// Evaluate, broadcast, and trim the two boundary columns
    ///
    /// Coefficient values at the boundary points are never used: the boundary
    /// rows of the discretized operator come from the boundary conditions,
    /// not from the PDE. The result has shape `[batch, grid.len() - 2]`.
    pub fn evaluate_inner(
        &self,
        t: f64,
        grid: &Grid1D,
        batch: usize,
    ) -> Result<DMatrix<f64>, String> {
        let full = self.evaluate(t, grid, batch)?;
        Ok(full.columns(1, grid.len() - 2).into_owned())
    }
}

impl std::fmt::Debug for Coefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coefficient::Absent => write!(f, "Coefficient::Absent"),
            Coefficient::Function(_) => write!(f, "Coefficient::Function(..)"),
        }
    }
}

// =================================================================================================
// PdeCoefficients
// =================================================================================================

/// The three coefficients of a linear parabolic PDE
///
/// `V_t + a V_xx + b V_x + c V = 0`, with `a` the second-order (diffusion)
/// coefficient, `b` the first-order (drift) coefficient, and `c` the
/// zeroth-order coefficient.
///
/// # Precondition
///
/// For the equation to be parabolic, `a` must be strictly positive wherever
/// it is evaluated. This is a caller precondition, not validated here:
/// violating it produces a numerically meaningless (typically unstable)
/// result rather than an error.
#[derive(Debug)]
pub struct PdeCoefficients {
    /// Second-order coefficient `a(t, x)` (diffusion)
    pub second_order: Coefficient,

    /// First-order coefficient `b(t, x)` (drift)
    pub first_order: Coefficient,

    /// Zeroth-order coefficient `c(t, x)`
    pub zeroth_order: Coefficient,
}

impl PdeCoefficients {
    /// All three coefficients supplied explicitly
    pub fn full(second_order: Coefficient, first_order: Coefficient, zeroth_order: Coefficient) -> Self {
        Self { second_order, first_order, zeroth_order }
    }

    /// Pure diffusion: `V_t + a V_xx = 0`
    pub fn diffusion(second_order: Coefficient) -> Self {
        Self::full(second_order, Coefficient::Absent, Coefficient::Absent)
    }

    /// Advection-diffusion: `V_t + a V_xx + b V_x = 0`
    pub fn advection_diffusion(second_order: Coefficient, first_order: Coefficient) -> Self {
        Self::full(second_order, first_order, Coefficient::Absent)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
