//! Bump-and-reprice checks of analytic curve sensitivities.
//!
//! The point-level checks bump a provider through [`PointBump`] and reprice a
//! single coupon; they give the quantity each analytic entry of a
//! [`MulticurveSensitivity`](accrual_curves::MulticurveSensitivity) claims to
//! be. The node-level check bumps every zero-rate node of every curve of a
//! [`MulticurveProvider`] and is compared against the analytic sensitivities
//! projected with [`ParameterSensitivityCalculator`].

use std::collections::BTreeMap;

use accrual_config::{SensitivityConfig, Validate};
use accrual_core::Currency;
use accrual_curves::{
    CurveProvider, MulticurveProvider, ParameterSensitivity, ParameterSensitivityCalculator,
    PointBump, RateIndex,
};

use crate::calculators::{
    PresentValueCurveSensitivityDiscountingCalculator, PresentValueDiscountingCalculator,
};
use crate::error::{PricingError, PricingResult};
use crate::instruments::Coupon;

/// One node where the analytic and bumped sensitivities disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityMismatch {
    /// Curve name.
    pub curve: String,
    /// Node index on the curve.
    pub node: usize,
    /// Sensitivity from the backward sweep.
    pub analytic: f64,
    /// Sensitivity from bump-and-reprice.
    pub numeric: f64,
}

impl std::fmt::Display for SensitivityMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: analytic {:.6e}, numeric {:.6e}",
            self.curve, self.node, self.analytic, self.numeric
        )
    }
}

/// Finite-difference sensitivities of coupon present values.
///
/// # Example
///
/// ```rust
/// use accrual_config::SensitivityConfig;
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{MulticurveProvider, YieldCurve};
/// use accrual_pricing::instruments::{Coupon, FixedPayment};
/// use accrual_pricing::FiniteDifferenceChecker;
///
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(YieldCurve::new("USD-OIS", vec![1.0, 5.0], vec![0.04, 0.038]).unwrap())
///     .discounting(Currency::USD, "USD-OIS")
///     .build()
///     .unwrap();
/// let coupon = Coupon::from(FixedPayment::new(Currency::USD, 3.0, 1_000_000.0));
///
/// let checker = FiniteDifferenceChecker::new(&SensitivityConfig::default()).unwrap();
/// assert!(checker.check(&coupon, &curves).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FiniteDifferenceChecker {
    bump_size: f64,
    central_difference: bool,
    tolerance: f64,
}

impl Default for FiniteDifferenceChecker {
    fn default() -> Self {
        let config = SensitivityConfig::default();
        Self {
            bump_size: config.bump_size,
            central_difference: config.central_difference,
            tolerance: config.tolerance,
        }
    }
}

impl FiniteDifferenceChecker {
    /// Creates a checker from a validated configuration.
    pub fn new(config: &SensitivityConfig) -> PricingResult<Self> {
        config.validate_or_error()?;
        Ok(Self {
            bump_size: config.bump_size,
            central_difference: config.central_difference,
            tolerance: config.tolerance,
        })
    }

    /// Bump size used for every difference.
    #[must_use]
    pub fn bump_size(&self) -> f64 {
        self.bump_size
    }

    /// Relative tolerance of [`Self::compare`].
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn difference(&self, pv: impl Fn(f64) -> PricingResult<f64>) -> PricingResult<f64> {
        let h = self.bump_size;
        if self.central_difference {
            Ok((pv(h)? - pv(-h)?) / (2.0 * h))
        } else {
            Ok((pv(h)? - pv(0.0)?) / h)
        }
    }

    fn price<P: CurveProvider + ?Sized>(coupon: &Coupon, curves: &P) -> PricingResult<f64> {
        let pv = PresentValueDiscountingCalculator.coupon(coupon, curves)?;
        Ok(pv.amount(coupon.currency()))
    }

    /// Derivative of the present value to the zero rate of the currency's
    /// discounting curve at `time`.
    pub fn discounting_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Coupon,
        curves: &P,
        currency: Currency,
        time: f64,
    ) -> PricingResult<f64> {
        self.difference(|shift| {
            Self::price(coupon, &PointBump::zero_rate(currency, time, shift).apply(curves))
        })
    }

    /// Derivative of the present value to the simple forward over
    /// `[start, end]` implied by the currency's discounting curve.
    pub fn discount_forward_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Coupon,
        curves: &P,
        currency: Currency,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> PricingResult<f64> {
        self.difference(|shift| {
            let bump = PointBump::discount_forward(currency, start, end, accrual_factor, shift);
            Self::price(coupon, &bump.apply(curves))
        })
    }

    /// Derivative of the present value to the index forward over `[start, end]`.
    pub fn index_forward_sensitivity<P: CurveProvider + ?Sized>(
        &self,
        coupon: &Coupon,
        curves: &P,
        index: &RateIndex,
        start: f64,
        end: f64,
    ) -> PricingResult<f64> {
        self.difference(|shift| {
            let bump = PointBump::index_forward(index.clone(), start, end, shift);
            Self::price(coupon, &bump.apply(curves))
        })
    }

    /// Bumped sensitivities to every zero-rate node of every curve.
    pub fn node_sensitivities(
        &self,
        coupon: &Coupon,
        curves: &MulticurveProvider,
    ) -> PricingResult<ParameterSensitivity> {
        let mut result = BTreeMap::new();
        for name in curves.curve_names() {
            let curve = curves.curve(name)?;
            let nodes = (0..curve.parameter_count())
                .map(|node| {
                    self.difference(|shift| {
                        let bumped = curves.with_curve(curve.with_node_shift(node, shift)?)?;
                        Self::price(coupon, &bumped)
                    })
                })
                .collect::<PricingResult<Vec<_>>>()?;
            result.insert(name.to_string(), nodes);
        }
        Ok(ParameterSensitivity::from_map(result))
    }

    /// Node sensitivities from the backward sweep, in the coupon currency.
    pub fn analytic_node_sensitivities(
        &self,
        coupon: &Coupon,
        curves: &MulticurveProvider,
    ) -> PricingResult<ParameterSensitivity> {
        let point = PresentValueCurveSensitivityDiscountingCalculator.coupon(coupon, curves)?;
        match point.get(coupon.currency()) {
            Some(s) => Ok(ParameterSensitivityCalculator::new(curves).calculate(s)?),
            None => Ok(ParameterSensitivity::new()),
        }
    }

    /// Nodes where two parameter sensitivities differ by more than the
    /// tolerance, relative to the largest node magnitude on the same curve
    /// (floored at one). A curve missing from one side counts as zeros.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidArgument` if a curve has different node
    /// counts on the two sides.
    pub fn compare(
        &self,
        analytic: &ParameterSensitivity,
        numeric: &ParameterSensitivity,
    ) -> PricingResult<Vec<SensitivityMismatch>> {
        let mut names: Vec<&str> = analytic.curve_names().chain(numeric.curve_names()).collect();
        names.sort_unstable();
        names.dedup();

        let mut mismatches = Vec::new();
        for name in names {
            let a = analytic.get(name);
            let n = numeric.get(name);
            let len = a.or(n).map_or(0, <[f64]>::len);
            if a.is_some_and(|v| v.len() != len) || n.is_some_and(|v| v.len() != len) {
                return Err(PricingError::invalid_argument(format!(
                    "node counts differ for curve {name}"
                )));
            }
            let scale = a
                .into_iter()
                .chain(n)
                .flatten()
                .fold(1.0_f64, |m, v| m.max(v.abs()));
            for node in 0..len {
                let analytic = a.map_or(0.0, |v| v[node]);
                let numeric = n.map_or(0.0, |v| v[node]);
                if (analytic - numeric).abs() > self.tolerance * scale {
                    tracing::warn!(curve = name, node, analytic, numeric, "Sensitivity mismatch");
                    mismatches.push(SensitivityMismatch {
                        curve: name.to_string(),
                        node,
                        analytic,
                        numeric,
                    });
                }
            }
        }
        Ok(mismatches)
    }

    /// Runs the node-level check for one coupon.
    pub fn check(
        &self,
        coupon: &Coupon,
        curves: &MulticurveProvider,
    ) -> PricingResult<Vec<SensitivityMismatch>> {
        let analytic = self.analytic_node_sensitivities(coupon, curves)?;
        let numeric = self.node_sensitivities(coupon, curves)?;
        let mismatches = self.compare(&analytic, &numeric)?;
        tracing::debug!(
            currency = %coupon.currency(),
            mismatches = mismatches.len(),
            "Finite-difference check"
        );
        Ok(mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{CompoundedOvernightCoupon, FixedPayment};
    use accrual_core::Date;
    use accrual_curves::YieldCurve;
    use approx::assert_relative_eq;

    fn curves() -> MulticurveProvider {
        MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
            .curve(YieldCurve::new("USD-OIS", vec![0.25, 1.0, 3.0], vec![0.043, 0.041, 0.039]).unwrap())
            .curve(YieldCurve::new("USD-SOFR", vec![0.25, 1.0, 3.0], vec![0.044, 0.042, 0.040]).unwrap())
            .discounting(Currency::USD, "USD-OIS")
            .forward(RateIndex::sofr(), "USD-OIS")
            .build()
            .unwrap()
    }

    fn overnight() -> Coupon {
        CompoundedOvernightCoupon::new(
            Currency::USD,
            1.0,
            10_000_000.0,
            RateIndex::sofr(),
            vec![0.5, 0.75],
            vec![0.75, 1.0],
            vec![0.25, 0.25],
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_one_sided_and_central_agree() {
        let curves = curves();
        let coupon = Coupon::from(FixedPayment::new(Currency::USD, 2.0, 1_000.0));
        let central = FiniteDifferenceChecker::default();
        let one_sided = FiniteDifferenceChecker::new(
            &SensitivityConfig::default().with_central_difference(false),
        )
        .unwrap();

        let expected = -2.0 * curves.discount_factor(Currency::USD, 2.0).unwrap() * 1_000.0;
        let c = central
            .discounting_sensitivity(&coupon, &curves, Currency::USD, 2.0)
            .unwrap();
        let o = one_sided
            .discounting_sensitivity(&coupon, &curves, Currency::USD, 2.0)
            .unwrap();
        assert_relative_eq!(c, expected, max_relative = 1e-7);
        assert_relative_eq!(o, expected, max_relative = 1e-4);
    }

    #[test]
    fn test_node_check_passes_for_overnight_coupon() {
        let curves = curves();
        let checker = FiniteDifferenceChecker::default();
        let coupon = overnight();
        assert!(checker.check(&coupon, &curves).unwrap().is_empty());

        let numeric = checker.node_sensitivities(&coupon, &curves).unwrap();
        assert_eq!(numeric.curve_names().collect::<Vec<_>>(), vec!["USD-OIS", "USD-SOFR"]);
    }

    #[test]
    fn test_compare_reports_mismatch() {
        let checker = FiniteDifferenceChecker::default();
        let a = ParameterSensitivity::from_map(BTreeMap::from([("X".to_string(), vec![1.0, 2.0])]));
        let n = ParameterSensitivity::from_map(BTreeMap::from([("X".to_string(), vec![1.0, 2.5])]));
        let mismatches = checker.compare(&a, &n).unwrap();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].node, 1);

        let missing = ParameterSensitivity::from_map(BTreeMap::from([("Y".to_string(), vec![0.0])]));
        assert!(checker.compare(&a, &missing).unwrap().len() == 2);

        let short = ParameterSensitivity::from_map(BTreeMap::from([("X".to_string(), vec![1.0])]));
        assert!(matches!(
            checker.compare(&a, &short),
            Err(PricingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = SensitivityConfig::default().with_tolerance(0.0);
        assert!(FiniteDifferenceChecker::new(&config).is_err());
    }
}
