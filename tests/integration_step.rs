//! Integration tests: physics module + solver module
//!
//! These tests drive the full step pipeline (stencil, boundary injection,
//! marching, boundary restoration) through the public API.

use nalgebra::DMatrix;

use parab_rs::models::{BlackScholesModel, HeatEquation};
use parab_rs::physics::{
    BoundaryCondition, BoundaryConditions, Coefficient, EdgeValue, Grid1D, PdeCoefficients,
    RobinCoeffs,
};
use parab_rs::solver::{parabolic_equation_step, ParabolicProblem, ThetaScheme};

mod common;
use common::{max_abs_diff, relative_error, IdentityScheme};

// =================================================================================================
// Boundary Handling
// =================================================================================================

#[test]
fn test_dirichlet_identity_step() {
    // With a = b = c = 0 and an identity marching scheme, a step must leave
    // the interior untouched and set the boundary columns to exactly the
    // Dirichlet values at next_time.
    let grid = Grid1D::uniform(0.0, 1.0, 8).unwrap();
    let values = DMatrix::from_fn(2, 8, |k, j| (k * 10 + j) as f64);
    let boundaries = BoundaryConditions::dirichlet(2.5, -1.5);

    let stepped = parabolic_equation_step(
        1.0,
        0.25,
        &grid,
        &values,
        &boundaries,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &IdentityScheme,
    )
    .unwrap();

    for k in 0..2 {
        assert_eq!(stepped[(k, 0)], 2.5);
        assert_eq!(stepped[(k, 7)], -1.5);
        for j in 1..7 {
            assert_eq!(stepped[(k, j)], values[(k, j)]);
        }
    }
}

#[test]
fn test_time_dependent_dirichlet_evaluated_at_next_time() {
    // Boundary restoration must use next_time, not the start time.
    let grid = Grid1D::uniform(0.0, 1.0, 5).unwrap();
    let values = DMatrix::zeros(1, 5);
    let boundaries = BoundaryConditions::new(
        BoundaryCondition::from_fn(|t, _| RobinCoeffs::dirichlet(t)),
        BoundaryCondition::from_fn(|t, _| RobinCoeffs::dirichlet(-t)),
    );

    let stepped = parabolic_equation_step(
        1.0,
        0.25,
        &grid,
        &values,
        &boundaries,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &IdentityScheme,
    )
    .unwrap();

    assert!((stepped[(0, 0)] - 0.25).abs() < 1e-14);
    assert!((stepped[(0, 4)] + 0.25).abs() < 1e-14);
}

#[test]
fn test_zero_flux_keeps_constant_field_exactly() {
    // A constant field is a steady state of pure diffusion with zero-flux
    // Neumann edges: the corrected first/last rows annihilate constants and
    // the boundary extrapolation weights sum to one. This is exact, not
    // approximate, for any scheme and any grid.
    let grid = Grid1D::from_vec(vec![0.0, 0.1, 0.35, 0.6, 1.0, 1.3]).unwrap();
    let values = DMatrix::from_element(3, 6, 4.2);
    let problem = ParabolicProblem::new(
        grid,
        PdeCoefficients::diffusion(Coefficient::constant(0.7)),
        BoundaryConditions::zero_flux(),
    );

    let scheme = ThetaScheme::crank_nicolson();
    let stepped = problem.step(&values, 1.0, 0.8, &scheme).unwrap();

    assert!(max_abs_diff(&stepped, &values) < 1e-12);
}

// =================================================================================================
// Time Convention
// =================================================================================================

#[test]
fn test_backward_convention_is_enforced() {
    let grid = Grid1D::uniform(0.0, 1.0, 5).unwrap();
    let values = DMatrix::zeros(1, 5);
    let boundaries = BoundaryConditions::dirichlet(0.0, 0.0);

    let result = parabolic_equation_step(
        0.5,
        0.6,
        &grid,
        &values,
        &boundaries,
        &Coefficient::constant(1.0),
        &Coefficient::Absent,
        &Coefficient::Absent,
        &ThetaScheme::crank_nicolson(),
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("backward"));
}

// =================================================================================================
// Shape Preservation
// =================================================================================================

#[test]
fn test_shape_preserved_for_all_coefficient_combinations() {
    // [K, N] in, [K, N] out, for every present/absent combination of the
    // three coefficient functions.
    let (batch, n) = (3, 12);
    let grid = Grid1D::uniform(0.0, 2.0, n).unwrap();
    let values = DMatrix::from_fn(batch, n, |k, j| ((k + 1) * j) as f64 * 0.1);
    let boundaries = BoundaryConditions::dirichlet(0.0, 1.0);
    let scheme = ThetaScheme::implicit();

    for mask in 0..8u8 {
        let second = if mask & 1 != 0 {
            Coefficient::constant(0.3)
        } else {
            Coefficient::Absent
        };
        let first = if mask & 2 != 0 {
            Coefficient::constant(-0.2)
        } else {
            Coefficient::Absent
        };
        let zeroth = if mask & 4 != 0 {
            Coefficient::constant(0.1)
        } else {
            Coefficient::Absent
        };

        let stepped = parabolic_equation_step(
            1.0, 0.9, &grid, &values, &boundaries, &second, &first, &zeroth, &scheme,
        )
        .unwrap();

        assert_eq!(
            stepped.shape(),
            (batch, n),
            "shape changed for coefficient mask {:03b}",
            mask
        );
    }
}

// =================================================================================================
// Accuracy Against Analytical Solutions
// =================================================================================================

#[test]
fn test_heat_equation_sine_mode_decay() {
    // Stepping V_t + k V_xx = 0 backward from t0 to t1 diffuses the profile
    // by t0 - t1: the first sine mode must decay by the known factor.
    let model = HeatEquation::new(0.1);
    let grid = Grid1D::uniform(0.0, 1.0, 101).unwrap();
    let mode = model.sine_mode(&grid, 1);
    let values = DMatrix::from_fn(1, 101, |_, j| mode[j]);

    let problem = model.problem(grid, BoundaryConditions::dirichlet(0.0, 0.0));
    let scheme = ThetaScheme::crank_nicolson();

    // Four steps of 0.025 from t = 0.1 back to t = 0
    let mut field = values.clone();
    let mut t = 0.1;
    for _ in 0..4 {
        field = problem.step(&field, t, t - 0.025, &scheme).unwrap();
        t -= 0.025;
    }

    let decay = model.decay_factor(1.0, 1, 0.1);
    for j in 0..101 {
        let expected = decay * values[(0, j)];
        assert!(
            (field[(0, j)] - expected).abs() < 2e-4,
            "point {}: {} vs {}",
            j,
            field[(0, j)],
            expected
        );
    }
}

#[test]
fn test_heat_equation_higher_mode_decays_faster() {
    let model = HeatEquation::new(0.05);
    let grid = Grid1D::uniform(0.0, 1.0, 81).unwrap();

    let mode1 = model.sine_mode(&grid, 1);
    let mode3 = model.sine_mode(&grid, 3);
    // Batch the two modes together
    let values = DMatrix::from_fn(2, 81, |k, j| if k == 0 { mode1[j] } else { mode3[j] });

    let problem = model.problem(grid, BoundaryConditions::dirichlet(0.0, 0.0));
    let stepped = problem
        .step(&values, 0.5, 0.0, &ThetaScheme::implicit())
        .unwrap();

    // Compare peak amplitudes: mode 3 decays 9x faster in the exponent
    let peak1 = stepped.row(0).iter().cloned().fold(0.0, f64::max);
    let peak3 = stepped.row(1).iter().cloned().fold(0.0, f64::max);
    assert!(peak1 > 0.0);
    assert!(peak3 < peak1 * 0.5);
}

// =================================================================================================
// Batched Option Pricing
// =================================================================================================

#[test]
fn test_put_call_parity_preserved_by_stepping() {
    // Step a call and a put as one batch of two, with per-batch boundary
    // data chosen to satisfy put-call parity. The forward x - K e^{-r tau}
    // solves both the continuous and the discrete equations (the stencil is
    // exact on linear profiles), so the stepped difference must track the
    // parity forward to time-integration accuracy.
    let model = BlackScholesModel::new(0.3, 0.05);
    let (strike, expiry) = (100.0, 1.0);
    let grid = Grid1D::log_uniform(1.0, 400.0, 121).unwrap();
    let x_min = grid.lower();
    let x_max = grid.upper();

    let call = BlackScholesModel::call_payoff(&grid, strike);
    let put = BlackScholesModel::put_payoff(&grid, strike);
    let values = DMatrix::from_fn(2, 121, |k, j| if k == 0 { call[j] } else { put[j] });

    let rate = model.rate;
    let lower = BoundaryCondition::from_fn(move |t, _grid| {
        let discounted = strike * (-rate * (expiry - t)).exp();
        RobinCoeffs {
            alpha: Some(EdgeValue::Scalar(1.0)),
            beta: None,
            gamma: EdgeValue::PerBatch(nalgebra::DVector::from_vec(vec![
                0.0,
                discounted - x_min,
            ])),
        }
    });
    let upper = BoundaryCondition::from_fn(move |t, _grid| {
        let discounted = strike * (-rate * (expiry - t)).exp();
        RobinCoeffs {
            alpha: Some(EdgeValue::Scalar(1.0)),
            beta: None,
            gamma: EdgeValue::PerBatch(nalgebra::DVector::from_vec(vec![
                x_max - discounted,
                0.0,
            ])),
        }
    });

    let problem = ParabolicProblem::new(
        grid,
        model.coefficients(),
        BoundaryConditions::new(lower, upper),
    );

    // Outer loop: 20 Crank-Nicolson steps from expiry back to t = 0.5
    let scheme = ThetaScheme::crank_nicolson();
    let mut field = values;
    let dt = 0.025;
    let mut t = expiry;
    for _ in 0..20 {
        field = problem.step(&field, t, t - dt, &scheme).unwrap();
        t -= dt;
    }

    let forward = model.parity_forward(&problem.grid, strike, expiry - t);
    for j in 0..121 {
        let difference = field[(0, j)] - field[(1, j)];
        assert!(
            (difference - forward[j]).abs() < 1e-4,
            "parity violated at point {}: {} vs {}",
            j,
            difference,
            forward[j]
        );
    }
}

#[test]
fn test_call_price_bounds() {
    // Basic sanity on a single stepped call: positive, below the asset
    // price, above the discounted intrinsic value. Implicit Euler is the
    // monotone member of the theta family, so positivity is structural and
    // the bounds only need slack for its O(dt) accuracy.
    let model = BlackScholesModel::new(0.25, 0.03);
    let (strike, expiry) = (100.0, 0.5);
    let grid = Grid1D::log_uniform(5.0, 500.0, 101).unwrap();

    let payoff = BlackScholesModel::call_payoff(&grid, strike);
    let values = DMatrix::from_fn(1, 101, |_, j| payoff[j]);
    let problem = model.call_problem(grid, strike, expiry);

    let scheme = ThetaScheme::implicit();
    let mut field = values;
    let mut t = expiry;
    for _ in 0..10 {
        field = problem.step(&field, t, t - 0.05, &scheme).unwrap();
        t -= 0.05;
    }

    let discounted = strike * (-model.rate * expiry).exp();
    for j in 0..101 {
        let x = problem.grid.coords()[j];
        let price = field[(0, j)];
        assert!(price > -1e-8, "negative price at x = {}", x);
        assert!(price < x + 1e-8, "price above asset at x = {}", x);
        assert!(
            price > (x - discounted) - 1e-2,
            "price below discounted intrinsic at x = {}",
            x
        );
    }
}

// =================================================================================================
// Error Detection
// =================================================================================================

#[test]
fn test_invalid_boundary_configuration_fails_lower() {
    let grid = Grid1D::uniform(0.0, 1.0, 6).unwrap();
    let values = DMatrix::zeros(1, 6);
    let boundaries = BoundaryConditions::new(
        BoundaryCondition::from_fn(|_, _| RobinCoeffs {
            alpha: None,
            beta: None,
            gamma: EdgeValue::Scalar(1.0),
        }),
        BoundaryCondition::dirichlet(0.0),
    );

    let result = parabolic_equation_step(
        1.0,
        0.5,
        &grid,
        &values,
        &boundaries,
        &Coefficient::constant(1.0),
        &Coefficient::Absent,
        &Coefficient::Absent,
        &ThetaScheme::crank_nicolson(),
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot both be absent"));
}

#[test]
fn test_invalid_boundary_configuration_fails_upper() {
    let grid = Grid1D::uniform(0.0, 1.0, 6).unwrap();
    let values = DMatrix::zeros(1, 6);
    let boundaries = BoundaryConditions::new(
        BoundaryCondition::dirichlet(0.0),
        BoundaryCondition::from_fn(|_, _| RobinCoeffs {
            alpha: None,
            beta: None,
            gamma: EdgeValue::Scalar(1.0),
        }),
    );

    // Even with an identity scheme that never evaluates the equation, the
    // boundary restoration at next_time must catch the invalid condition.
    let result = parabolic_equation_step(
        1.0,
        0.5,
        &grid,
        &values,
        &boundaries,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &IdentityScheme,
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot both be absent"));
}

#[test]
fn test_mismatched_coefficient_shape_fails() {
    use parab_rs::physics::CoeffValue;

    let grid = Grid1D::uniform(0.0, 1.0, 6).unwrap();
    let values = DMatrix::zeros(1, 6);
    let boundaries = BoundaryConditions::dirichlet(0.0, 0.0);

    // Profile of the wrong length
    let bad = Coefficient::from_fn(|_, _| CoeffValue::from_vec(vec![1.0, 2.0, 3.0]));

    let result = parabolic_equation_step(
        1.0,
        0.5,
        &grid,
        &values,
        &boundaries,
        &bad,
        &Coefficient::Absent,
        &Coefficient::Absent,
        &ThetaScheme::crank_nicolson(),
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("broadcast"));
}

// =================================================================================================
// Cross-Scheme Comparison
// =================================================================================================

#[test]
fn test_implicit_and_cn_agree_on_smooth_data() {
    // Both schemes converge to the same solution; on smooth data with small
    // steps they must agree to their order of accuracy.
    let model = HeatEquation::new(0.1);
    let grid = Grid1D::uniform(0.0, 1.0, 61).unwrap();
    let mode = model.sine_mode(&grid, 1);
    let values = DMatrix::from_fn(1, 61, |_, j| mode[j]);

    let problem = model.problem(grid, BoundaryConditions::dirichlet(0.0, 0.0));

    let step_with = |scheme: &ThetaScheme| {
        let mut field = values.clone();
        let mut t = 0.05;
        for _ in 0..10 {
            field = problem.step(&field, t, t - 0.005, scheme).unwrap();
            t -= 0.005;
        }
        field
    };

    let cn = step_with(&ThetaScheme::crank_nicolson());
    let implicit = step_with(&ThetaScheme::implicit());

    let peak_cn = cn.iter().cloned().fold(0.0, f64::max);
    let peak_implicit = implicit.iter().cloned().fold(0.0, f64::max);
    assert!(relative_error(peak_implicit, peak_cn) < 1e-2);
}
