//! Error types for the pricing methods.

use accrual_config::ConfigError;
use accrual_curves::CurveError;
use thiserror::Error;

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur during pricing calculations.
///
/// Non-finite intermediate values (from non-positive or NaN discount factors)
/// are not errors; they propagate through the result.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A required input was not supplied.
    #[error("{name} must not be null")]
    NullArgument {
        /// Name of the missing input.
        name: String,
    },

    /// An input failed a precondition.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the violated precondition.
        reason: String,
    },

    /// The curve provider could not resolve a curve.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PricingError {
    /// Creates a null argument error.
    #[must_use]
    pub fn null_argument(name: impl Into<String>) -> Self {
        Self::NullArgument { name: name.into() }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrual_core::Currency;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PricingError::null_argument("Coupon").to_string(),
            "Coupon must not be null"
        );
        assert_eq!(
            PricingError::invalid_argument("accrual factor must be positive").to_string(),
            "invalid argument: accrual factor must be positive"
        );
    }

    #[test]
    fn test_from_curve_error() {
        let err: PricingError = CurveError::no_discount_curve(Currency::JPY).into();
        assert!(matches!(err, PricingError::Curve(CurveError::NoDiscountCurve { .. })));
        assert!(err.to_string().contains("JPY"));
    }
}
