//! Black–Scholes option pricing
//!
//! The Black–Scholes equation for the value `V(t, x)` of a European option
//! on an asset at price `x` is a linear parabolic PDE solved backward from
//! the option's expiry:
//!
//! ```text
//! V_t + (σ²x²/2) V_xx + r x V_x − r V = 0
//! ```
//!
//! All three coefficient slots of the stepper are exercised, the
//! second-order coefficient is genuinely space-dependent, and the natural
//! upper boundary for a call is time-dependent (the discounted-strike
//! asymptote), which makes this the model that stresses every part of the
//! discretization the heat equation leaves idle.
//!
//! Price grids are typically log-uniform ([`Grid1D::log_uniform`]): relative
//! resolution is what matters for prices.

use nalgebra::DVector;

use crate::physics::boundary::{BoundaryCondition, BoundaryConditions, RobinCoeffs};
use crate::physics::coefficients::{Coefficient, PdeCoefficients};
use crate::physics::data::CoeffValue;
use crate::physics::grid::Grid1D;
use crate::solver::step::ParabolicProblem;

// =================================================================================================
// BlackScholesModel
// =================================================================================================

/// Black–Scholes model with constant volatility and risk-free rate
///
/// # Example
///
/// ```rust
/// use parab_rs::models::BlackScholesModel;
/// use parab_rs::physics::Grid1D;
///
/// let model = BlackScholesModel::new(0.3, 0.05);
/// let grid = Grid1D::log_uniform(1.0, 400.0, 101).unwrap();
/// let problem = model.call_problem(grid, 100.0, 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesModel {
    /// Volatility `σ`
    pub volatility: f64,

    /// Risk-free rate `r`
    pub rate: f64,
}

impl BlackScholesModel {
    /// Create a model with volatility `σ` and risk-free rate `r`
    pub fn new(volatility: f64, rate: f64) -> Self {
        Self { volatility, rate }
    }

    /// The PDE coefficients `a = σ²x²/2`, `b = rx`, `c = −r`
    pub fn coefficients(&self) -> PdeCoefficients {
        let sigma_sq = self.volatility * self.volatility;
        let rate = self.rate;

        PdeCoefficients::full(
            Coefficient::from_fn(move |_t, grid| {
                CoeffValue::from_profile(grid.coords().map(|x| 0.5 * sigma_sq * x * x))
            }),
            Coefficient::from_fn(move |_t, grid| {
                CoeffValue::from_profile(grid.coords().map(|x| rate * x))
            }),
            Coefficient::constant(-rate),
        )
    }

    /// Problem for a European call expiring at `expiry` with strike `strike`
    ///
    /// Boundaries: `V = 0` at the lower edge (a call on a worthless asset is
    /// worthless) and the discounted asymptote `V = x_max − K e^{−r(T−t)}`
    /// at the upper edge. The upper condition depends on time, so it is a
    /// closure over the model parameters.
    pub fn call_problem(&self, grid: Grid1D, strike: f64, expiry: f64) -> ParabolicProblem {
        let rate = self.rate;
        let x_max = grid.upper();

        let upper = BoundaryCondition::from_fn(move |t, _grid| {
            let discounted_strike = strike * (-rate * (expiry - t)).exp();
            RobinCoeffs::dirichlet(x_max - discounted_strike)
        });

        ParabolicProblem::new(
            grid,
            self.coefficients(),
            BoundaryConditions::new(BoundaryCondition::dirichlet(0.0), upper),
        )
    }

    /// Problem for a European put expiring at `expiry` with strike `strike`
    ///
    /// Boundaries mirror the call: the discounted strike at the lower edge,
    /// zero at the upper edge.
    pub fn put_problem(&self, grid: Grid1D, strike: f64, expiry: f64) -> ParabolicProblem {
        let rate = self.rate;

        let lower = BoundaryCondition::from_fn(move |t, _grid| {
            let discounted_strike = strike * (-rate * (expiry - t)).exp();
            RobinCoeffs::dirichlet(discounted_strike)
        });

        ParabolicProblem::new(
            grid,
            self.coefficients(),
            BoundaryConditions::new(lower, BoundaryCondition::dirichlet(0.0)),
        )
    }

    // ========================================= Payoffs ==========================================

    /// Call payoff `max(x − K, 0)` sampled on the grid
    pub fn call_payoff(grid: &Grid1D, strike: f64) -> DVector<f64> {
        grid.coords().map(|x| (x - strike).max(0.0))
    }

    /// Put payoff `max(K − x, 0)` sampled on the grid
    pub fn put_payoff(grid: &Grid1D, strike: f64) -> DVector<f64> {
        grid.coords().map(|x| (strike - x).max(0.0))
    }

    /// Forward value `x − K e^{−rτ}` of put–call parity at time to expiry `τ`
    ///
    /// For European options, `call − put = x − K e^{−rτ}` pointwise. The
    /// identity is linear in the payoff, so a discretization that steps both
    /// options with the same operator preserves it to solver accuracy,
    /// which makes it a whole-pipeline consistency check.
    pub fn parity_forward(&self, grid: &Grid1D, strike: f64, time_to_expiry: f64) -> DVector<f64> {
        let discounted_strike = strike * (-self.rate * time_to_expiry).exp();
        grid.coords().map(|x| x - discounted_strike)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
