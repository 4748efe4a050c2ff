//! Batched tridiagonal linear solver
//!
//! Implicit marching needs the solution of `M x = d` with `M` tridiagonal,
//! once per batch row per step. The Thomas algorithm (specialized Gaussian
//! elimination without pivoting) does this in O(m) per row: one forward
//! sweep eliminating the sub-diagonal, one back substitution.
//!
//! No pivoting means the algorithm requires nonvanishing pivots; the
//! diagonally dominant systems produced by implicit discretizations of
//! parabolic equations satisfy this. A vanishing pivot is reported as a
//! singular-system error rather than dividing through.
//!
//! Batch rows are fully independent, so above the crate's parallel
//! threshold they are solved on the rayon pool (feature `parallel`).

use nalgebra::DMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pivots below this magnitude are treated as singular
const PIVOT_TOLERANCE: f64 = 1e-14;

// =================================================================================================
// Batched Thomas solve
// =================================================================================================

/// Solve `M x = d` for each batch row
///
/// # Arguments
///
/// * `diagonal` - main diagonal of `M`, `[batch, m]`
/// * `upper` - super-diagonal coupling to the `+1` neighbor; last column unused
/// * `lower` - sub-diagonal coupling to the `-1` neighbor; first column unused
/// * `rhs` - right-hand sides `d`, `[batch, m]`
///
/// # Errors
///
/// Shape mismatch between the four inputs, or a pivot smaller than the
/// singularity tolerance in any batch row.
pub fn solve_tridiagonal_systems(
    diagonal: &DMatrix<f64>,
    upper: &DMatrix<f64>,
    lower: &DMatrix<f64>,
    rhs: &DMatrix<f64>,
) -> Result<DMatrix<f64>, String> {
    let (batch, m) = diagonal.shape();
    if upper.shape() != (batch, m) || lower.shape() != (batch, m) || rhs.shape() != (batch, m) {
        return Err(format!(
            "Tridiagonal solve needs matching shapes, got diagonal {:?}, upper {:?}, lower {:?}, rhs {:?}",
            diagonal.shape(),
            upper.shape(),
            lower.shape(),
            rhs.shape()
        ));
    }

    let solve_row = |k: usize| -> Result<Vec<f64>, String> {
        let mut c_prime = vec![0.0; m];
        let mut d_prime = vec![0.0; m];

        // Forward sweep
        let mut pivot = diagonal[(k, 0)];
        if pivot.abs() < PIVOT_TOLERANCE {
            return Err(format!("Singular tridiagonal system in batch row {}", k));
        }
        c_prime[0] = upper[(k, 0)] / pivot;
        d_prime[0] = rhs[(k, 0)] / pivot;

        for j in 1..m {
            pivot = diagonal[(k, j)] - lower[(k, j)] * c_prime[j - 1];
            if pivot.abs() < PIVOT_TOLERANCE {
                return Err(format!("Singular tridiagonal system in batch row {}", k));
            }
            if j + 1 < m {
                c_prime[j] = upper[(k, j)] / pivot;
            }
            d_prime[j] = (rhs[(k, j)] - lower[(k, j)] * d_prime[j - 1]) / pivot;
        }

        // Back substitution
        let mut x = vec![0.0; m];
        x[m - 1] = d_prime[m - 1];
        for j in (0..m - 1).rev() {
            x[j] = d_prime[j] - c_prime[j] * x[j + 1];
        }
        Ok(x)
    };

    let rows = solve_all_rows(batch, m, solve_row)?;

    let mut solution = DMatrix::zeros(batch, m);
    for (k, row) in rows.iter().enumerate() {
        for j in 0..m {
            solution[(k, j)] = row[j];
        }
    }
    Ok(solution)
}

#[cfg(feature = "parallel")]
fn solve_all_rows<F>(batch: usize, m: usize, solve_row: F) -> Result<Vec<Vec<f64>>, String>
where
    F: Fn(usize) -> Result<Vec<f64>, String> + Sync + Send,
{
    if batch * m > crate::solver::parallel_threshold() {
        (0..batch).into_par_iter().map(solve_row).collect()
    } else {
        (0..batch).map(solve_row).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn solve_all_rows<F>(batch: usize, _m: usize, solve_row: F) -> Result<Vec<Vec<f64>>, String>
where
    F: Fn(usize) -> Result<Vec<f64>, String>,
{
    (0..batch).map(solve_row).collect()
}

// =================================================================================================
// Tests
// =================================================================================================
