//! Problem definition: grid, coefficients, boundary conditions
//!
//! This module describes WHAT to solve: the continuous problem
//!
//! ```text
//! V_t + a(t, x) V_xx + b(t, x) V_x + c(t, x) V = 0
//! ```
//!
//! on a one-dimensional grid, together with a Robin boundary condition at
//! each edge. The numerical machinery that turns this description into a
//! discrete system and steps it lives in [`crate::solver`]; the two sides
//! only meet through the types defined here.
//!
//! # Core Concepts
//!
//! - **[`Grid1D`]**: ordered, possibly non-uniform spatial grid
//! - **[`Coefficient`]**: one PDE coefficient, either absent or a function of
//!   `(time, grid)`; [`PdeCoefficients`] bundles the three of them
//! - **[`CoeffValue`]**: what a coefficient function returns (scalar,
//!   per-point profile, or batch-by-grid field), with explicit checked
//!   broadcasting
//! - **[`BoundaryCondition`]**: a time-dependent Robin condition
//!   `alpha*V + beta*V_n = gamma` at one edge; [`BoundaryConditions`] pairs
//!   the two edges
//!
//! # Batch dimension
//!
//! The solution is stored as a `DMatrix<f64>` with rows = batch and
//! columns = grid points: several independent solution functions sharing the
//! same grid and equation are stepped together. Everything in this module
//! broadcasts against that shape explicitly.
//!
//! # Example
//!
//! ```rust
//! use parab_rs::physics::{Grid1D, Coefficient, PdeCoefficients, BoundaryConditions};
//!
//! let grid = Grid1D::uniform(0.0, 1.0, 51).unwrap();
//! let coefficients = PdeCoefficients::diffusion(Coefficient::constant(0.05));
//! let boundaries = BoundaryConditions::dirichlet(0.0, 0.0);
//! ```

// module declarations
pub mod boundary;
pub mod coefficients;
pub mod data;
pub mod grid;

// re-export commonly used types for convenience
pub use boundary::{BoundaryCondition, BoundaryConditions, EdgeValue, RobinCoeffs};
pub use coefficients::{CoeffFn, Coefficient, PdeCoefficients};
pub use data::CoeffValue;
pub use grid::Grid1D;
