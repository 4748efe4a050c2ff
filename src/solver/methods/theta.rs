//! Weighted implicit/explicit (theta) marching scheme
//!
//! # Mathematical Background
//!
//! Integrating `dv/dt = A(t) v + r(t)` backward from `t2` to `t1` with
//! `dt = t2 - t1` and weighting the two endpoint evaluations by
//! `theta` (implicit weight, at `t1`) and `1 - theta` (explicit weight, at
//! `t2`) gives
//!
//! ```text
//! (I + dt·θ·A(t1)) v(t1) = (I − dt·(1−θ)·A(t2)) v(t2)
//!                          − dt·(1−θ)·r(t2) − dt·θ·r(t1)
//! ```
//!
//! One family of schemes, three classical members:
//!
//! | θ   | Scheme            | Order  | Stability              |
//! |-----|-------------------|--------|------------------------|
//! | 0   | Explicit Euler    | O(dt)  | Conditional (dt ~ h²)  |
//! | 1/2 | Crank–Nicolson    | O(dt²) | Unconditional          |
//! | 1   | Implicit Euler    | O(dt)  | Unconditional, damping |
//!
//! The implicit half requires one tridiagonal solve per batch row per step
//! (see [`crate::solver::methods::tridiagonal`]); the explicit half is a
//! banded matvec. θ = 0 skips the solve entirely and θ = 1 skips the
//! equation evaluation at `t2`.
//!
//! # Choosing θ
//!
//! - **Crank–Nicolson** is the default choice: second order, stable at any
//!   step size. Its undamped high-frequency modes can ring on discontinuous
//!   data; a few implicit startup steps suppress them.
//! - **Implicit Euler** when robustness matters more than accuracy.
//! - **Explicit Euler** only with step sizes against the h² restriction;
//!   mainly useful as a reference and in benchmarks.

use nalgebra::DMatrix;

use crate::solver::methods::tridiagonal::solve_tridiagonal_systems;
use crate::solver::traits::{EquationGenerator, TimeMarchingScheme};

// =================================================================================================
// ThetaScheme
// =================================================================================================

/// One-step theta method for the interior system
///
/// # Example
///
/// ```rust
/// use parab_rs::solver::ThetaScheme;
///
/// let cn = ThetaScheme::crank_nicolson();
/// assert_eq!(cn.theta(), 0.5);
///
/// // Arbitrary weights are validated
/// assert!(ThetaScheme::new(0.7).is_ok());
/// assert!(ThetaScheme::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThetaScheme {
    theta: f64,
}

impl ThetaScheme {
    // ======================================= Constructors ======================================

    /// Create a scheme with implicit weight `theta`
    ///
    /// # Errors
    ///
    /// `theta` outside `[0, 1]` is rejected.
    pub fn new(theta: f64) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&theta) {
            return Err(format!("Theta must lie in [0, 1], got {}", theta));
        }
        Ok(Self { theta })
    }

    /// Explicit Euler (θ = 0)
    pub fn explicit() -> Self {
        Self { theta: 0.0 }
    }

    /// Crank–Nicolson (θ = 1/2)
    pub fn crank_nicolson() -> Self {
        Self { theta: 0.5 }
    }

    /// Implicit Euler (θ = 1)
    pub fn implicit() -> Self {
        Self { theta: 1.0 }
    }

    /// The implicit weight
    pub fn theta(&self) -> f64 {
        self.theta
    }

    // ======================================= Substepping ========================================

    /// March across `[t_end, t_start]` in `steps` uniform substeps
    ///
    /// Convenience for callers that want several substeps between two
    /// discretization times without running the full outer loop.
    pub fn march_many(
        &self,
        inner_values: &DMatrix<f64>,
        t_end: f64,
        t_start: f64,
        steps: usize,
        equation: &EquationGenerator<'_>,
    ) -> Result<DMatrix<f64>, String> {
        if steps == 0 {
            return Err("march_many needs at least one substep".to_string());
        }

        let dt = (t_start - t_end) / steps as f64;
        let mut values = inner_values.clone();
        for i in 0..steps {
            let t2 = t_start - dt * i as f64;
            let t1 = t_start - dt * (i + 1) as f64;
            values = self.march(&values, t1, t2, equation)?;
            crate::solver::validate_values(&values, "interior field")?;
        }
        Ok(values)
    }
}

impl TimeMarchingScheme for ThetaScheme {
    fn march(
        &self,
        inner_values: &DMatrix<f64>,
        t1: f64,
        t2: f64,
        equation: &EquationGenerator<'_>,
    ) -> Result<DMatrix<f64>, String> {
        if t1 > t2 {
            return Err(format!(
                "Theta scheme marches backward: t1 ({}) must not exceed t2 ({})",
                t1, t2
            ));
        }

        let dt = t2 - t1;
        if dt == 0.0 {
            return Ok(inner_values.clone());
        }

        let theta = self.theta;
        let explicit_weight = 1.0 - theta;
        let (batch, m) = inner_values.shape();

        // Explicit side: rhs = (I − dt·(1−θ)·A(t2)) v − dt·(1−θ)·r(t2)
        let mut rhs = inner_values.clone();
        if explicit_weight > 0.0 {
            let at_t2 = equation(t2)?;
            let av = at_t2.operator.apply(inner_values);
            for k in 0..batch {
                for j in 0..m {
                    rhs[(k, j)] -=
                        dt * explicit_weight * (av[(k, j)] + at_t2.inhomogeneity[(k, j)]);
                }
            }
        }

        // Implicit side: solve (I + dt·θ·A(t1)) v = rhs − dt·θ·r(t1)
        if theta > 0.0 {
            let at_t1 = equation(t1)?;
            let op = &at_t1.operator;

            let scale = dt * theta;
            let diagonal = DMatrix::from_fn(batch, m, |k, j| 1.0 + scale * op.diagonal[(k, j)]);
            let upper = DMatrix::from_fn(batch, m, |k, j| scale * op.upper[(k, j)]);
            let lower = DMatrix::from_fn(batch, m, |k, j| scale * op.lower[(k, j)]);
            for k in 0..batch {
                for j in 0..m {
                    rhs[(k, j)] -= scale * at_t1.inhomogeneity[(k, j)];
                }
            }

            solve_tridiagonal_systems(&diagonal, &upper, &lower, &rhs)
        } else {
            Ok(rhs)
        }
    }

    fn name(&self) -> &str {
        if self.theta == 0.0 {
            "Explicit Euler"
        } else if self.theta == 1.0 {
            "Implicit Euler"
        } else if self.theta == 0.5 {
            "Crank-Nicolson"
        } else {
            "Theta scheme"
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
