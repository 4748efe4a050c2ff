//! Concrete time-marching methods
//!
//! This module contains implementations of the
//! [`TimeMarchingScheme`](crate::solver::TimeMarchingScheme) trait and the
//! linear algebra they need.
//!
//! # Architecture
//!
//! The separation between the abstract scheme interface (`solver::traits`)
//! and the concrete methods here keeps the discretization core agnostic of
//! how the interior system is integrated: new methods are added without
//! touching the stencil or boundary machinery.
//!
//! # Available Methods
//!
//! - **[`ThetaScheme`]**: the weighted implicit/explicit family
//!   - `ThetaScheme::explicit()` — explicit Euler, O(dt), conditionally stable
//!   - `ThetaScheme::crank_nicolson()` — O(dt²), unconditionally stable,
//!     the production default
//!   - `ThetaScheme::implicit()` — implicit Euler, O(dt), strongly damping
//!
//! The implicit members rely on [`tridiagonal::solve_tridiagonal_systems`],
//! a batched Thomas solve that is also exported for callers implementing
//! their own schemes.

pub mod theta;
pub mod tridiagonal;

// Re-exports for convenience
pub use theta::ThetaScheme;
pub use tridiagonal::solve_tridiagonal_systems;
