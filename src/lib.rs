//! parab-rs: Parabolic PDE Stepping Framework
//!
//! A batched backward-stepping engine for one-dimensional linear parabolic
//! PDEs of the form
//!
//! ```text
//! V_t + a(t, x) V_xx + b(t, x) V_x + c(t, x) V = 0
//! ```
//!
//! on possibly non-uniform grids, with Robin/Neumann/Dirichlet boundary
//! conditions. Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! parab-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - The physics side defines the problem: grid, coefficients, boundary
//!      conditions ([`physics`], [`models`])
//!    - The solver side provides the discretization and the stepping
//!      machinery ([`solver`])
//!
//! 2. **Pluggable Time Marching**
//!    - The spatial discretization produces, for any time, the interior
//!      system `dv/dt = A(t) v + r(t)` with `A` tridiagonal
//!    - How that system is integrated across a step is behind the
//!      [`TimeMarchingScheme`](solver::TimeMarchingScheme) trait; the crate
//!      ships the theta family ([`ThetaScheme`](solver::ThetaScheme)), and
//!      callers can supply their own
//!
//! # Quick Start
//!
//! ```rust
//! use parab_rs::physics::{Grid1D, Coefficient, PdeCoefficients, BoundaryConditions};
//! use parab_rs::solver::{ParabolicProblem, ThetaScheme};
//! use nalgebra::DMatrix;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Define the problem: heat equation with cold walls
//! let problem = ParabolicProblem::new(
//!     Grid1D::uniform(0.0, 1.0, 51)?,
//!     PdeCoefficients::diffusion(Coefficient::constant(0.1)),
//!     BoundaryConditions::dirichlet(0.0, 0.0),
//! );
//!
//! // 2. Final condition at t = 1 (stepping is backward in time)
//! let values = DMatrix::from_fn(1, 51, |_, j| {
//!     (std::f64::consts::PI * j as f64 / 50.0).sin()
//! });
//!
//! // 3. Step back to t = 0.9 with Crank-Nicolson
//! let scheme = ThetaScheme::crank_nicolson();
//! let stepped = problem.step(&values, 1.0, 0.9, &scheme)?;
//!
//! assert_eq!(stepped.shape(), values.shape());
//! # Ok(())
//! # }
//! ```
//!
//! # Batching
//!
//! The value field is a `DMatrix<f64>` with rows = batch and columns = grid
//! points: several independent solution functions (e.g. a call and a put
//! option, or many payoffs) sharing the same grid and equation are stepped
//! together in one pass.
//!
//! # Time Direction
//!
//! Steps always run backward: the first time argument is the later one, the
//! second the earlier one. Passing them in the wrong order is an error, not
//! a silent forward step.
//!
//! # Modules
//!
//! - [`physics`]: problem definition (grid, coefficients, boundaries)
//! - [`solver`]: discretization and time stepping
//! - [`models`]: ready-made problems (heat equation, Black–Scholes)
//! - [`output`]: CSV export and profile plots

// Core modules
pub mod physics;

pub mod models;
pub mod output;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use parab_rs::prelude::*;
    //! ```
    pub use crate::physics::{BoundaryCondition,
                             BoundaryConditions,
                             CoeffValue,
                             Coefficient,
                             Grid1D,
                             PdeCoefficients,
                             RobinCoeffs};
    pub use crate::solver::{parabolic_equation_step,
                            ParabolicProblem,
                            ThetaScheme,
                            TimeMarchingScheme};
}
