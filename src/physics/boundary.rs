//! Boundary conditions
//!
//! Conditions at each edge of the grid are accepted in Robin form
//!
//! ```text
//! alpha * V + beta * V_n = gamma
//! ```
//!
//! where `V_n` is the derivative along the outward normal (pointing out of
//! the domain at each edge). The form generalizes the two classical cases:
//!
//! - **Dirichlet** (`beta` absent): the boundary value is fixed,
//!   `V = gamma / alpha`
//! - **Neumann** (`alpha` absent): the outward normal derivative is fixed,
//!   `V_n = gamma / beta`
//!
//! Having both `alpha` and `beta` absent leaves no condition at all; this is
//! a configuration error and is rejected by [`RobinCoeffs::validate`].
//!
//! All three terms may vary with time and per batch entry: a boundary
//! condition is a function of `(time, grid)` returning the current
//! [`RobinCoeffs`].

use nalgebra::DVector;

use crate::physics::grid::Grid1D;

// =================================================================================================
// EdgeValue
// =================================================================================================

/// A value attached to one boundary edge
///
/// Either one number shared by the whole batch, or one number per batch
/// entry (several independent right-hand sides stepped together may carry
/// different boundary data).
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeValue {
    /// Same value for every batch entry
    Scalar(f64),

    /// One value per batch entry
    PerBatch(DVector<f64>),
}

impl EdgeValue {
    /// Broadcast to a vector of length `batch`, or fail with a shape diagnostic
    pub fn broadcast_to(&self, batch: usize) -> Result<DVector<f64>, String> {
        match self {
            EdgeValue::Scalar(value) => Ok(DVector::from_element(batch, *value)),
            EdgeValue::PerBatch(values) => {
                if values.len() != batch {
                    return Err(format!(
                        "Cannot broadcast per-batch edge value of length {} to batch size {}",
                        values.len(),
                        batch
                    ));
                }
                Ok(values.clone())
            }
        }
    }
}

impl From<f64> for EdgeValue {
    fn from(value: f64) -> Self {
        EdgeValue::Scalar(value)
    }
}

// =================================================================================================
// RobinCoeffs
// =================================================================================================

/// The `(alpha, beta, gamma)` triple of one edge at one instant
///
/// Encodes `alpha*V + beta*V_n = gamma`. `alpha` is `None` for pure-Neumann
/// conditions and `beta` is `None` for pure-Dirichlet conditions.
#[derive(Debug, Clone)]
pub struct RobinCoeffs {
    /// Weight of the boundary value; `None` for pure Neumann
    pub alpha: Option<EdgeValue>,

    /// Weight of the outward normal derivative; `None` for pure Dirichlet
    pub beta: Option<EdgeValue>,

    /// Right-hand side of the condition
    pub gamma: EdgeValue,
}

impl RobinCoeffs {
    // ======================================= Constructors ======================================

    /// Dirichlet condition `V = value`
    pub fn dirichlet(value: impl Into<EdgeValue>) -> Self {
        Self {
            alpha: Some(EdgeValue::Scalar(1.0)),
            beta: None,
            gamma: value.into(),
        }
    }

    /// Neumann condition `V_n = derivative` (outward normal derivative)
    pub fn neumann(derivative: impl Into<EdgeValue>) -> Self {
        Self {
            alpha: None,
            beta: Some(EdgeValue::Scalar(1.0)),
            gamma: derivative.into(),
        }
    }

    /// General Robin condition `alpha*V + beta*V_n = gamma`
    pub fn robin(
        alpha: impl Into<EdgeValue>,
        beta: impl Into<EdgeValue>,
        gamma: impl Into<EdgeValue>,
    ) -> Self {
        Self {
            alpha: Some(alpha.into()),
            beta: Some(beta.into()),
            gamma: gamma.into(),
        }
    }

    // ======================================== Validation ========================================

    /// Reject the degenerate triple with neither `alpha` nor `beta`
    ///
    /// # Errors
    ///
    /// Both absent means the condition constrains nothing: a configuration
    /// error, not a numerical one.
    pub fn validate(&self) -> Result<(), String> {
        if self.alpha.is_none() && self.beta.is_none() {
            return Err(
                "Invalid boundary condition: alpha and beta cannot both be absent".to_string(),
            );
        }
        Ok(())
    }

    /// Check this is a pure-Dirichlet condition (`beta` absent)
    pub fn is_dirichlet(&self) -> bool {
        self.beta.is_none()
    }
}

// =================================================================================================
// BoundaryCondition
// =================================================================================================

/// Signature of a boundary condition function: `(time, grid) -> RobinCoeffs`
pub type BoundaryFn = Box<dyn Fn(f64, &Grid1D) -> RobinCoeffs + Send + Sync>;

/// A time-dependent boundary condition at one edge
///
/// Evaluated once per edge when the equation is discretized at a given time,
/// and once more per edge when boundary values are restored after a step.
///
/// # Example
///
/// ```rust
/// use parab_rs::physics::{BoundaryCondition, RobinCoeffs};
///
/// // Fixed value
/// let fixed = BoundaryCondition::dirichlet(1.0);
///
/// // Value decaying in time
/// let decaying = BoundaryCondition::from_fn(|t, _grid| {
///     RobinCoeffs::dirichlet((-t).exp())
/// });
/// ```
pub struct BoundaryCondition(BoundaryFn);

impl BoundaryCondition {
    // ======================================= Constructors ======================================

    /// Time-independent Dirichlet condition `V = value`
    pub fn dirichlet(value: f64) -> Self {
        Self(Box::new(move |_t, _grid| RobinCoeffs::dirichlet(value)))
    }

    /// Time-independent Neumann condition `V_n = derivative`
    pub fn neumann(derivative: f64) -> Self {
        Self(Box::new(move |_t, _grid| RobinCoeffs::neumann(derivative)))
    }

    /// Time-independent Robin condition `alpha*V + beta*V_n = gamma`
    pub fn robin(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self(Box::new(move |_t, _grid| RobinCoeffs::robin(alpha, beta, gamma)))
    }

    /// Arbitrary time/grid-dependent condition
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f64, &Grid1D) -> RobinCoeffs + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    // ======================================== Evaluation ========================================

    /// Evaluate the condition at a given time
    pub fn evaluate(&self, t: f64, grid: &Grid1D) -> RobinCoeffs {
        (self.0)(t, grid)
    }
}

impl std::fmt::Debug for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundaryCondition(..)")
    }
}

// =================================================================================================
// BoundaryConditions (pair)
// =================================================================================================

/// The pair of conditions at the two edges of the grid
#[derive(Debug)]
pub struct BoundaryConditions {
    /// Condition at the lower edge (first grid point)
    pub lower: BoundaryCondition,

    /// Condition at the upper edge (last grid point)
    pub upper: BoundaryCondition,
}

impl BoundaryConditions {
    /// Pair the two edge conditions
    pub fn new(lower: BoundaryCondition, upper: BoundaryCondition) -> Self {
        Self { lower, upper }
    }

    /// Dirichlet conditions with fixed values at both edges
    pub fn dirichlet(lower_value: f64, upper_value: f64) -> Self {
        Self::new(
            BoundaryCondition::dirichlet(lower_value),
            BoundaryCondition::dirichlet(upper_value),
        )
    }

    /// Zero-flux (homogeneous Neumann) conditions at both edges
    pub fn zero_flux() -> Self {
        Self::new(BoundaryCondition::neumann(0.0), BoundaryCondition::neumann(0.0))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
