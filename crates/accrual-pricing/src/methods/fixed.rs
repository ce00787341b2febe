//! Discounting methods for fixed payments and fixed coupons.

use accrual_core::{CurrencyAmount, MultiCurrencyAmount};
use accrual_curves::{CurveProvider, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity};

use super::{warn_if_not_finite, DiscountingMethod};
use crate::error::PricingResult;
use crate::instruments::{FixedCoupon, FixedPayment};

/// Prices a [`FixedPayment`]: `PV = P(t) · amount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPaymentDiscountingMethod;

impl DiscountingMethod for FixedPaymentDiscountingMethod {
    type Coupon = FixedPayment;

    fn present_value<P: CurveProvider + ?Sized>(
        &self,
        payment: &FixedPayment,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        let df = curves.discount_factor(payment.currency, payment.payment_time)?;
        let pv = df * payment.amount;
        warn_if_not_finite("present_value", pv, payment.currency, payment.payment_time);
        Ok(MultiCurrencyAmount::of(CurrencyAmount::new(payment.currency, pv)))
    }

    fn present_value_curve_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        payment: &FixedPayment,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        let t = payment.payment_time;
        let df = curves.discount_factor(payment.currency, t)?;
        let df_bar = payment.amount;
        let sensitivity = MulticurveSensitivity::of_discounting(
            curves.discount_curve_name(payment.currency)?,
            vec![(t, -t * df * df_bar)],
        );
        Ok(MultiCurrencyMulticurveSensitivity::of(payment.currency, sensitivity))
    }
}

/// Prices a [`FixedCoupon`] as the fixed payment of its amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCouponDiscountingMethod;

impl DiscountingMethod for FixedCouponDiscountingMethod {
    type Coupon = FixedCoupon;

    fn present_value<P: CurveProvider + ?Sized>(
        &self,
        coupon: &FixedCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        FixedPaymentDiscountingMethod.present_value(&coupon.to_fixed_payment(), curves)
    }

    fn present_value_curve_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &FixedCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        FixedPaymentDiscountingMethod.present_value_curve_sensitivity(&coupon.to_fixed_payment(), curves)
    }
}
