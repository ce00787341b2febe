//! Discounting method for annually compounded overnight coupons.

use accrual_core::{Currency, CurrencyAmount, MultiCurrencyAmount};
use accrual_curves::{
    CurveProvider, ForwardSensitivity, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity,
};

use super::{warn_if_not_finite, DiscountingMethod};
use crate::error::{PricingError, PricingResult};
use crate::instruments::CompoundedOvernightCoupon;

/// Prices a [`CompoundedOvernightCoupon`] by discounting.
///
/// `PV = P(t_pay) · N · Π (1 + F_i)^δ_i` with
/// `F_i = (P(s_i) / P(e_i))^(1/δ_i) - 1`, all discount factors taken from the
/// coupon currency's discounting curve.
///
/// # Example
///
/// ```rust
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{MulticurveProvider, RateIndex, YieldCurve};
/// use accrual_pricing::instruments::CompoundedOvernightCoupon;
/// use accrual_pricing::methods::{CompoundedOvernightDiscountingMethod, DiscountingMethod};
///
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(YieldCurve::flat("BRL-CDI", 0.11).unwrap())
///     .discounting(Currency::BRL, "BRL-CDI")
///     .forward(RateIndex::cdi(), "BRL-CDI")
///     .build()
///     .unwrap();
/// let coupon = CompoundedOvernightCoupon::new(
///     Currency::BRL, 1.0, 1_000_000.0, RateIndex::cdi(),
///     vec![0.0, 0.5], vec![0.5, 1.0], vec![0.5, 0.5],
/// ).unwrap();
///
/// // Compounding on the discounting curve cancels the discounting.
/// let pv = CompoundedOvernightDiscountingMethod.present_value(&coupon, &curves).unwrap();
/// assert!((pv.amount(Currency::BRL) - 1_000_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundedOvernightDiscountingMethod;

impl CompoundedOvernightDiscountingMethod {
    /// The annually compounded forward rate over `[start, end]`:
    /// `(P(start) / P(end))^(1/δ) - 1` on the discounting curve of `currency`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `accrual_factor` is not strictly positive.
    pub fn annually_compounded_forward_rate<P: CurveProvider + ?Sized>(
        currency: Currency,
        start: f64,
        end: f64,
        accrual_factor: f64,
        curves: &P,
    ) -> PricingResult<f64> {
        if accrual_factor <= 0.0 || accrual_factor.is_nan() {
            return Err(PricingError::invalid_argument(format!(
                "the accrual factor should be strictly positive, got {accrual_factor}"
            )));
        }
        let df_start = curves.discount_factor(currency, start)?;
        let df_end = curves.discount_factor(currency, end)?;
        let forward = (df_start / df_end).powf(1.0 / accrual_factor) - 1.0;
        warn_if_not_finite("forward", forward, currency, start);
        tracing::trace!(%currency, start, end, accrual_factor, forward, "Annually compounded forward");
        Ok(forward)
    }

    fn forwards_and_ratio<P: CurveProvider + ?Sized>(
        coupon: &CompoundedOvernightCoupon,
        curves: &P,
    ) -> PricingResult<(Vec<f64>, f64)> {
        let mut forwards = Vec::with_capacity(coupon.period_count());
        let mut ratio = 1.0;
        for (start, end, delta) in coupon.fixing_periods() {
            let forward =
                Self::annually_compounded_forward_rate(coupon.currency(), start, end, delta, curves)?;
            ratio *= (1.0 + forward).powf(delta);
            forwards.push(forward);
        }
        Ok((forwards, ratio))
    }
}

impl DiscountingMethod for CompoundedOvernightDiscountingMethod {
    type Coupon = CompoundedOvernightCoupon;

    fn present_value<P: CurveProvider + ?Sized>(
        &self,
        coupon: &CompoundedOvernightCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        let currency = coupon.currency();
        let (_, ratio) = Self::forwards_and_ratio(coupon, curves)?;
        let df = curves.discount_factor(currency, coupon.payment_time())?;
        let pv = df * coupon.notional_accrued() * ratio;

        warn_if_not_finite("present_value", pv, currency, coupon.payment_time());
        tracing::debug!(
            %currency,
            index = %coupon.index(),
            periods = coupon.period_count(),
            payment_time = coupon.payment_time(),
            pv,
            "Compounded overnight coupon present value"
        );

        Ok(MultiCurrencyAmount::of(CurrencyAmount::new(currency, pv)))
    }

    fn present_value_curve_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &CompoundedOvernightCoupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        let currency = coupon.currency();
        let payment_time = coupon.payment_time();
        let notional = coupon.notional_accrued();

        let df = curves.discount_factor(currency, payment_time)?;
        let (forwards, ratio) = Self::forwards_and_ratio(coupon, curves)?;

        // Backward sweep
        let pv_bar = 1.0;
        let ratio_bar = notional * df * pv_bar;
        let mut forward_sensitivities = Vec::with_capacity(coupon.period_count());
        for ((start, end, delta), forward) in coupon.fixing_periods().zip(&forwards) {
            let rebase = (curves.discount_factor(currency, start)?
                / curves.discount_factor(currency, end)?)
            .powf((1.0 - delta) / delta);
            let forward_bar = rebase * ratio_bar * ratio * delta / (1.0 + forward);
            forward_sensitivities.push(ForwardSensitivity::new(start, end, delta, forward_bar));
        }
        let df_bar = notional * ratio * pv_bar;

        let discounting = MulticurveSensitivity::of_discounting(
            curves.discount_curve_name(currency)?,
            vec![(payment_time, -payment_time * df * df_bar)],
        );
        let forward = MulticurveSensitivity::of_forward(
            curves.forward_curve_name(coupon.index())?,
            forward_sensitivities,
        );

        tracing::debug!(
            %currency,
            index = %coupon.index(),
            periods = coupon.period_count(),
            df_bar,
            "Compounded overnight coupon curve sensitivity"
        );

        Ok(MultiCurrencyMulticurveSensitivity::of(
            currency,
            discounting.plus(&forward),
        ))
    }
}
