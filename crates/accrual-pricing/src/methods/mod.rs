//! Discounting pricing methods.
//!
//! Each method is a stateless unit struct pricing one coupon type against
//! any [`CurveProvider`]. Every method offers the same pair of operations:
//!
//! - `present_value`: the discounted value of the coupon;
//! - `present_value_curve_sensitivity`: the analytic derivative of that value
//!   to the curves, computed by a backward sweep over the same formula.
//!
//! The sensitivity pass recomputes its intermediates rather than sharing them
//! with `present_value`, so the two can be called independently.

mod fixed;
mod ibor;
mod overnight;

pub use fixed::{FixedCouponDiscountingMethod, FixedPaymentDiscountingMethod};
pub use ibor::IborCouponDiscountingMethod;
pub use overnight::CompoundedOvernightDiscountingMethod;

use accrual_core::{Currency, MultiCurrencyAmount};
use accrual_curves::{CurveProvider, MultiCurrencyMulticurveSensitivity};

use crate::error::PricingResult;

/// A present value and curve sensitivity method for one coupon type.
pub trait DiscountingMethod {
    /// The coupon type priced.
    type Coupon;

    /// Computes the present value.
    fn present_value<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Self::Coupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount>;

    /// Computes the point sensitivity of the present value to the curves.
    fn present_value_curve_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Self::Coupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity>;
}

/// Logs non-finite values; they are returned to the caller unchanged.
fn warn_if_not_finite(quantity: &'static str, value: f64, currency: Currency, time: f64) {
    if !value.is_finite() {
        tracing::warn!(
            quantity,
            value,
            %currency,
            time,
            "Non-finite value in discounting method; check the discount curve"
        );
    }
}
