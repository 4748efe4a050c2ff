//! Broadcastable coefficient data
//!
//! Coefficient and boundary functions may return values of different ranks:
//! a single number valid everywhere, a per-grid-point profile, or a full
//! batch-by-grid field. This module provides the tagged container for these
//! values and the explicit, checked broadcast that turns any of them into the
//! `[batch, n]` matrix the discretization works with.
//!
//! # Why explicit broadcasting
//!
//! nalgebra has no ambient broadcasting convention, and an implicit one would
//! hide shape bugs until deep inside the stencil arithmetic. Every broadcast
//! here is a checked operation that either produces the target shape or fails
//! with a diagnostic naming the offending shape.

use nalgebra::{DMatrix, DVector};
use std::fmt;

// =================================================================================================
// CoeffValue
// =================================================================================================

/// Value returned by a PDE coefficient function
///
/// # Variants
///
/// - **Scalar**: one value for every batch entry and grid point
/// - **Profile**: one value per grid point, shared across the batch
/// - **Field**: a full `[batch, n]` matrix (or `[1, n]`, replicated across
///   the batch)
///
/// # Example
///
/// ```rust
/// use parab_rs::physics::CoeffValue;
/// use nalgebra::DVector;
///
/// let constant = CoeffValue::Scalar(0.5);
/// let matrix = constant.broadcast_to(4, 10).unwrap();
/// assert_eq!(matrix.shape(), (4, 10));
///
/// let profile = CoeffValue::Profile(DVector::from_element(10, 1.0));
/// assert!(profile.broadcast_to(4, 10).is_ok());
/// assert!(profile.broadcast_to(4, 7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CoeffValue {
    /// Single value, broadcast everywhere
    Scalar(f64),

    /// One value per grid point, shared by all batch entries
    Profile(DVector<f64>),

    /// Full batch-by-grid field
    Field(DMatrix<f64>),
}

impl CoeffValue {
    // ======================================= Constructors ======================================

    /// Create from a single value
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create a per-grid-point profile from a Vec
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Profile(DVector::from_vec(values))
    }

    /// Create from a per-grid-point profile
    pub fn from_profile(profile: DVector<f64>) -> Self {
        Self::Profile(profile)
    }

    /// Create from a full batch-by-grid field
    pub fn from_field(field: DMatrix<f64>) -> Self {
        Self::Field(field)
    }

    // ========================================== Queries =========================================

    /// Check the value is a scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check the value is a profile
    pub fn is_profile(&self) -> bool {
        matches!(self, Self::Profile(_))
    }

    /// Check the value is a field
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Shape of the stored data: `[]`, `[n]` or `[rows, cols]`
    pub fn shape(&self) -> Vec<usize> {
        match self {
            CoeffValue::Scalar(_) => vec![],
            CoeffValue::Profile(v) => vec![v.len()],
            CoeffValue::Field(m) => vec![m.nrows(), m.ncols()],
        }
    }

    // ======================================= Broadcasting =======================================

    /// Broadcast to a `[batch, n]` matrix, or fail with a shape diagnostic
    ///
    /// # Broadcast rules
    ///
    /// - `Scalar`: always broadcasts
    /// - `Profile`: length must equal `n`; the row is replicated `batch` times
    /// - `Field`: must already be `[batch, n]`, or `[1, n]` which is
    ///   replicated across the batch
    ///
    /// # Errors
    ///
    /// Any other shape is a broadcast error.
    pub fn broadcast_to(&self, batch: usize, n: usize) -> Result<DMatrix<f64>, String> {
        match self {
            CoeffValue::Scalar(value) => Ok(DMatrix::from_element(batch, n, *value)),

            CoeffValue::Profile(profile) => {
                if profile.len() != n {
                    return Err(format!(
                        "Cannot broadcast profile of length {} to {} grid points",
                        profile.len(),
                        n
                    ));
                }
                Ok(DMatrix::from_fn(batch, n, |_, j| profile[j]))
            }

            CoeffValue::Field(field) => {
                if field.ncols() != n {
                    return Err(format!(
                        "Cannot broadcast field of shape [{}, {}] to {} grid points",
                        field.nrows(),
                        field.ncols(),
                        n
                    ));
                }
                if field.nrows() == batch {
                    Ok(field.clone())
                } else if field.nrows() == 1 {
                    Ok(DMatrix::from_fn(batch, n, |_, j| field[(0, j)]))
                } else {
                    Err(format!(
                        "Cannot broadcast field of shape [{}, {}] to batch size {}",
                        field.nrows(),
                        field.ncols(),
                        batch
                    ))
                }
            }
        }
    }
}

impl From<f64> for CoeffValue {
    fn from(value: f64) -> Self {
        CoeffValue::Scalar(value)
    }
}

// =================================================================================================
// Display
// =================================================================================================

impl fmt::Display for CoeffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoeffValue::Scalar(value) => write!(f, "Scalar ({})", value),
            CoeffValue::Profile(v) => write!(f, "Profile [{}]", v.len()),
            CoeffValue::Field(m) => write!(f, "Field [{} * {}]", m.nrows(), m.ncols()),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_broadcast() {
        let value = CoeffValue::Scalar(2.5);
        let m = value.broadcast_to(3, 5).unwrap();
        assert_eq!(m.shape(), (3, 5));
        assert!(m.iter().all(|&x| x == 2.5));
    }

    #[test]
    fn test_profile_broadcast() {
        let value = CoeffValue::from_vec(vec![1.0, 2.0, 3.0]);
        let m = value.broadcast_to(2, 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 2)], 3.0);
    }

    #[test]
    fn test_profile_length_mismatch() {
        let value = CoeffValue::from_vec(vec![1.0, 2.0, 3.0]);
        let result = value.broadcast_to(2, 4);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("length 3"));
    }

    #[test]
    fn test_field_exact_shape() {
        let field = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let value = CoeffValue::Field(field.clone());
        assert_eq!(value.broadcast_to(2, 3).unwrap(), field);
    }

    #[test]
    fn test_field_row_replication() {
        let field = DMatrix::from_row_slice(1, 3, &[1.0, 2.0, 3.0]);
        let value = CoeffValue::Field(field);
        let m = value.broadcast_to(4, 3).unwrap();
        assert_eq!(m.shape(), (4, 3));
        assert_eq!(m[(3, 0)], 1.0);
        assert_eq!(m[(0, 2)], 3.0);
    }

    #[test]
    fn test_field_batch_mismatch() {
        let field = DMatrix::from_element(3, 4, 1.0);
        assert!(CoeffValue::Field(field.clone()).broadcast_to(2, 4).is_err());
        assert!(CoeffValue::Field(field).broadcast_to(3, 5).is_err());
    }

    #[test]
    fn test_shape_queries() {
        assert_eq!(CoeffValue::Scalar(1.0).shape(), Vec::<usize>::new());
        assert_eq!(CoeffValue::from_vec(vec![0.0; 7]).shape(), vec![7]);
        assert!(CoeffValue::Scalar(1.0).is_scalar());
        assert!(CoeffValue::from_vec(vec![0.0]).is_profile());
    }
}
