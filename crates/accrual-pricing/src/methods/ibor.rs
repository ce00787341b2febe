//! Discounting method for term-index coupons.

use accrual_core::{CurrencyAmount, MultiCurrencyAmount};
use accrual_curves::{
    CurveProvider, ForwardSensitivity, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity,
};

use super::{warn_if_not_finite, DiscountingMethod};
use crate::error::PricingResult;
use crate::instruments::IborCoupon;

/// Prices an [`IborCoupon`]: `PV = P(t_pay) · N · δ · F`, with `F` the
/// simply compounded forward of the index over its fixing period.
#[derive(Debug, Clone, Copy, Default)]
pub struct IborCouponDiscountingMethod;

impl DiscountingMethod for IborCouponDiscountingMethod {
    type Coupon = IborCoupon;

    fn present_value<P: CurveProvider + ?Sized>(
        &self,
        coupon: &IborCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        let forward = curves.forward_rate(
            coupon.index(),
            coupon.fixing_period_start_time(),
            coupon.fixing_period_end_time(),
            coupon.fixing_accrual_factor(),
        )?;
        let df = curves.discount_factor(coupon.currency(), coupon.payment_time())?;
        let pv = df * coupon.notional() * coupon.payment_accrual_factor() * forward;

        warn_if_not_finite("present_value", pv, coupon.currency(), coupon.payment_time());
        tracing::debug!(
            currency = %coupon.currency(),
            index = %coupon.index(),
            forward,
            pv,
            "Ibor coupon present value"
        );

        Ok(MultiCurrencyAmount::of(CurrencyAmount::new(coupon.currency(), pv)))
    }

    fn present_value_curve_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &IborCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        let currency = coupon.currency();
        let payment_time = coupon.payment_time();
        let forward = curves.forward_rate(
            coupon.index(),
            coupon.fixing_period_start_time(),
            coupon.fixing_period_end_time(),
            coupon.fixing_accrual_factor(),
        )?;
        let df = curves.discount_factor(currency, payment_time)?;

        // Backward sweep
        let pv_bar = 1.0;
        let forward_bar = df * coupon.notional() * coupon.payment_accrual_factor() * pv_bar;
        let df_bar = coupon.notional() * coupon.payment_accrual_factor() * forward * pv_bar;

        let discounting = MulticurveSensitivity::of_discounting(
            curves.discount_curve_name(currency)?,
            vec![(payment_time, -payment_time * df * df_bar)],
        );
        let forward = MulticurveSensitivity::of_forward(
            curves.forward_curve_name(coupon.index())?,
            vec![ForwardSensitivity::new(
                coupon.fixing_period_start_time(),
                coupon.fixing_period_end_time(),
                coupon.fixing_accrual_factor(),
                forward_bar,
            )],
        );

        Ok(MultiCurrencyMulticurveSensitivity::of(
            currency,
            discounting.plus(&forward),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrual_core::{Currency, Date};
    use accrual_curves::{MulticurveProvider, PointBump, RateIndex, YieldCurve};
    use approx::assert_relative_eq;

    fn curves() -> MulticurveProvider {
        MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
            .curve(YieldCurve::new("EUR-ESTR", vec![0.5, 2.0], vec![0.025, 0.024]).unwrap())
            .curve(YieldCurve::new("EUR-E3M", vec![0.5, 2.0], vec![0.027, 0.026]).unwrap())
            .discounting(Currency::EUR, "EUR-ESTR")
            .forward(RateIndex::euribor_3m(), "EUR-E3M")
            .build()
            .unwrap()
    }

    fn coupon() -> IborCoupon {
        IborCoupon::new(
            Currency::EUR,
            1.0,
            0.2556,
            5_000_000.0,
            RateIndex::euribor_3m(),
            0.75,
            1.0,
            0.2556,
        )
        .unwrap()
    }

    #[test]
    fn test_present_value() {
        let curves = curves();
        let pv = IborCouponDiscountingMethod.present_value(&coupon(), &curves).unwrap();
        let forward = curves
            .forward_rate(&RateIndex::euribor_3m(), 0.75, 1.0, 0.2556)
            .unwrap();
        let df = curves.discount_factor(Currency::EUR, 1.0).unwrap();
        assert_relative_eq!(
            pv.amount(Currency::EUR),
            df * 5_000_000.0 * 0.2556 * forward,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_sensitivities_match_point_bumps() {
        let curves = curves();
        let coupon = coupon();
        let sensitivity = IborCouponDiscountingMethod
            .present_value_curve_sensitivity(&coupon, &curves)
            .unwrap();
        let eur = sensitivity.get(Currency::EUR).unwrap();
        let h = 1e-6;

        let pv_dsc = |shift: f64| {
            let bumped = PointBump::zero_rate(Currency::EUR, 1.0, shift).apply(&curves);
            IborCouponDiscountingMethod
                .present_value(&coupon, &bumped)
                .unwrap()
                .amount(Currency::EUR)
        };
        let fd_dsc = (pv_dsc(h) - pv_dsc(-h)) / (2.0 * h);
        assert_relative_eq!(eur.discounting()["EUR-ESTR"][0].1, fd_dsc, max_relative = 1e-6);

        let pv_fwd = |shift: f64| {
            let bumped =
                PointBump::index_forward(RateIndex::euribor_3m(), 0.75, 1.0, shift).apply(&curves);
            IborCouponDiscountingMethod
                .present_value(&coupon, &bumped)
                .unwrap()
                .amount(Currency::EUR)
        };
        let fd_fwd = (pv_fwd(h) - pv_fwd(-h)) / (2.0 * h);
        assert_relative_eq!(eur.forward()["EUR-E3M"][0].value, fd_fwd, max_relative = 1e-6);
        assert!(eur.forward().get("EUR-ESTR").is_none());
    }
}
