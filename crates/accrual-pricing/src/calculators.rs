//! Calculators dispatching over [`Coupon`] and [`Annuity`].

use accrual_core::MultiCurrencyAmount;
use accrual_curves::{CurveProvider, MultiCurrencyMulticurveSensitivity};

use crate::error::PricingResult;
use crate::instruments::{Annuity, Coupon};
use crate::methods::{
    CompoundedOvernightDiscountingMethod, DiscountingMethod, FixedCouponDiscountingMethod,
    FixedPaymentDiscountingMethod, IborCouponDiscountingMethod,
};

/// Present value of any coupon or annuity by discounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueDiscountingCalculator;

impl PresentValueDiscountingCalculator {
    /// Present value of a coupon.
    pub fn coupon<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Coupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        match coupon {
            Coupon::FixedPayment(c) => FixedPaymentDiscountingMethod.present_value(c, curves),
            Coupon::Fixed(c) => FixedCouponDiscountingMethod.present_value(c, curves),
            Coupon::Ibor(c) => IborCouponDiscountingMethod.present_value(c, curves),
            Coupon::CompoundedOvernight(c) => {
                CompoundedOvernightDiscountingMethod.present_value(c, curves)
            }
        }
    }

    /// Sum of the coupon present values, per currency.
    pub fn annuity<P: CurveProvider + ?Sized>(
        &self,
        annuity: &Annuity,
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        annuity
            .coupons()
            .iter()
            .try_fold(MultiCurrencyAmount::new(), |total, coupon| {
                Ok(total.plus_all(&self.coupon(coupon, curves)?))
            })
    }
}

/// Point curve sensitivity of any coupon or annuity by discounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueCurveSensitivityDiscountingCalculator;

impl PresentValueCurveSensitivityDiscountingCalculator {
    /// Curve sensitivity of a coupon.
    pub fn coupon<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Coupon,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        match coupon {
            Coupon::FixedPayment(c) => {
                FixedPaymentDiscountingMethod.present_value_curve_sensitivity(c, curves)
            }
            Coupon::Fixed(c) => FixedCouponDiscountingMethod.present_value_curve_sensitivity(c, curves),
            Coupon::Ibor(c) => IborCouponDiscountingMethod.present_value_curve_sensitivity(c, curves),
            Coupon::CompoundedOvernight(c) => {
                CompoundedOvernightDiscountingMethod.present_value_curve_sensitivity(c, curves)
            }
        }
    }

    /// Concatenated coupon sensitivities; entries keep coupon order.
    pub fn annuity<P: CurveProvider + ?Sized>(
        &self,
        annuity: &Annuity,
        curves: &P,
    ) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        annuity
            .coupons()
            .iter()
            .try_fold(MultiCurrencyMulticurveSensitivity::new(), |total, coupon| {
                Ok(total.plus_all(&self.coupon(coupon, curves)?))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{CompoundedOvernightCoupon, FixedCoupon, FixedPayment};
    use accrual_core::{Currency, Date};
    use accrual_curves::{MulticurveProvider, RateIndex, YieldCurve};
    use approx::assert_relative_eq;

    fn curves() -> MulticurveProvider {
        MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
            .curve(YieldCurve::flat("BRL-CDI", 0.11).unwrap())
            .curve(YieldCurve::flat("USD-OIS", 0.04).unwrap())
            .discounting(Currency::BRL, "BRL-CDI")
            .discounting(Currency::USD, "USD-OIS")
            .forward(RateIndex::cdi(), "BRL-CDI")
            .build()
            .unwrap()
    }

    fn annuity() -> Annuity {
        let overnight = CompoundedOvernightCoupon::new(
            Currency::BRL,
            1.0,
            1_000_000.0,
            RateIndex::cdi(),
            vec![0.2, 0.6],
            vec![0.6, 1.0],
            vec![0.4, 0.4],
        )
        .unwrap();
        Annuity::default()
            .with_coupon(overnight)
            .with_coupon(FixedPayment::new(Currency::BRL, 1.0, -1_000_000.0))
            .with_coupon(FixedCoupon::new(Currency::USD, 0.5, 0.5, 100.0, 0.02))
    }

    #[test]
    fn test_annuity_present_value_sums_by_currency() {
        let curves = curves();
        let annuity = annuity();
        let total = PresentValueDiscountingCalculator.annuity(&annuity, &curves).unwrap();

        let by_coupon: Vec<_> = annuity
            .coupons()
            .iter()
            .map(|c| PresentValueDiscountingCalculator.coupon(c, &curves).unwrap())
            .collect();
        assert_relative_eq!(
            total.amount(Currency::BRL),
            by_coupon[0].amount(Currency::BRL) + by_coupon[1].amount(Currency::BRL),
            epsilon = 1e-9
        );
        assert_relative_eq!(total.amount(Currency::USD), by_coupon[2].amount(Currency::USD));
    }

    #[test]
    fn test_annuity_sensitivity_concatenates() {
        let curves = curves();
        let sensitivity = PresentValueCurveSensitivityDiscountingCalculator
            .annuity(&annuity(), &curves)
            .unwrap();
        let brl = sensitivity.get(Currency::BRL).unwrap();
        assert_eq!(brl.discounting()["BRL-CDI"].len(), 2);
        assert_eq!(brl.forward()["BRL-CDI"].len(), 2);
        assert_eq!(sensitivity.get(Currency::USD).unwrap().discounting()["USD-OIS"].len(), 1);

        let cleaned = sensitivity.cleaned(0.0);
        assert_eq!(cleaned.get(Currency::BRL).unwrap().discounting()["BRL-CDI"].len(), 1);
    }

    #[test]
    fn test_empty_annuity() {
        let curves = curves();
        assert!(PresentValueDiscountingCalculator
            .annuity(&Annuity::default(), &curves)
            .unwrap()
            .is_empty());
    }
}
