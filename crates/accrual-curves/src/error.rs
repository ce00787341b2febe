//! Error types for curve operations.

use accrual_core::{CoreError, Currency};
use accrual_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve not found in the provider.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// Name/identifier of the missing curve.
        name: String,
    },

    /// No discounting curve is registered for a currency.
    #[error("No discounting curve for currency {currency}")]
    NoDiscountCurve {
        /// The currency looked up.
        currency: Currency,
    },

    /// No forward curve is registered for an index.
    #[error("No forward curve for index {index}")]
    NoForwardCurve {
        /// The index looked up.
        index: String,
    },

    /// Not enough data points for a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Node times are not strictly increasing.
    #[error("Non-monotonic times at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time.
        prev: f64,
        /// Current time.
        current: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Builder error.
    #[error("Builder error: {reason}")]
    BuilderError {
        /// Description of the builder error.
        reason: String,
    },

    /// Snapshot could not be read.
    #[error("Snapshot error: {reason}")]
    SnapshotError {
        /// Description of the failure.
        reason: String,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {0}")]
    Math(#[from] MathError),

    /// Core type error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }

    /// Creates a missing discounting curve error.
    #[must_use]
    pub fn no_discount_curve(currency: Currency) -> Self {
        Self::NoDiscountCurve { currency }
    }

    /// Creates a missing forward curve error.
    #[must_use]
    pub fn no_forward_curve(index: impl Into<String>) -> Self {
        Self::NoForwardCurve {
            index: index.into(),
        }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic times error.
    #[must_use]
    pub fn non_monotonic_times(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTimes {
            index,
            prev,
            current,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a builder error.
    #[must_use]
    pub fn builder_error(reason: impl Into<String>) -> Self {
        Self::BuilderError {
            reason: reason.into(),
        }
    }

    /// Creates a snapshot error.
    #[must_use]
    pub fn snapshot_error(reason: impl Into<String>) -> Self {
        Self::SnapshotError {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        CurveError::snapshot_error(err.to_string())
    }
}
