//! Errors raised by the interpolation routines.

use thiserror::Error;

/// Result alias for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Failures of the numerical building blocks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Too few nodes for the scheme.
    #[error("Insufficient data: need at least {required} nodes, got {actual}")]
    InsufficientData {
        /// Minimum node count.
        required: usize,
        /// Nodes supplied.
        actual: usize,
    },

    /// Query outside the node range of an interpolator built without extrapolation.
    #[error("{x} is outside the node range [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// Query point.
        x: f64,
        /// First node.
        min: f64,
        /// Last node.
        max: f64,
    },

    /// Malformed node data.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What is wrong.
        reason: String,
    },
}

impl MathError {
    /// Too few nodes.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Malformed node data.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
