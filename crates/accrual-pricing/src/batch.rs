//! Batch pricing of annuities.

use accrual_config::{SensitivityConfig, Validate};
use accrual_core::MultiCurrencyAmount;
use accrual_curves::{CurveProvider, MultiCurrencyMulticurveSensitivity};
use rayon::prelude::*;

use crate::calculators::{
    PresentValueCurveSensitivityDiscountingCalculator, PresentValueDiscountingCalculator,
};
use crate::error::PricingResult;
use crate::instruments::Annuity;

/// Prices many annuities against one set of curves.
///
/// Batches at or above the configured `parallel_threshold` are spread over
/// the rayon thread pool; results keep input order either way.
#[derive(Debug, Clone)]
pub struct BatchPricer {
    parallel_threshold: usize,
}

impl Default for BatchPricer {
    fn default() -> Self {
        Self {
            parallel_threshold: SensitivityConfig::default().parallel_threshold,
        }
    }
}

impl BatchPricer {
    /// Creates a batch pricer from a validated configuration.
    pub fn new(config: &SensitivityConfig) -> PricingResult<Self> {
        config.validate_or_error()?;
        Ok(Self {
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Batch size at which pricing goes parallel.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }

    /// Present value of each annuity.
    pub fn price_batch<P: CurveProvider + ?Sized>(
        &self,
        annuities: &[Annuity],
        curves: &P,
    ) -> Vec<PricingResult<MultiCurrencyAmount>> {
        let parallel = self.is_parallel(annuities.len());
        tracing::debug!(batch = annuities.len(), parallel, "Pricing annuity batch");

        let price = |annuity: &Annuity| PresentValueDiscountingCalculator.annuity(annuity, curves);
        if parallel {
            annuities.par_iter().map(price).collect()
        } else {
            annuities.iter().map(price).collect()
        }
    }

    /// Curve sensitivity of each annuity.
    pub fn sensitivity_batch<P: CurveProvider + ?Sized>(
        &self,
        annuities: &[Annuity],
        curves: &P,
    ) -> Vec<PricingResult<MultiCurrencyMulticurveSensitivity>> {
        let parallel = self.is_parallel(annuities.len());
        tracing::debug!(batch = annuities.len(), parallel, "Computing annuity batch sensitivities");

        let sensitivity = |annuity: &Annuity| {
            PresentValueCurveSensitivityDiscountingCalculator.annuity(annuity, curves)
        };
        if parallel {
            annuities.par_iter().map(sensitivity).collect()
        } else {
            annuities.iter().map(sensitivity).collect()
        }
    }

    /// Sum of the present values of a batch.
    pub fn total_present_value<P: CurveProvider + ?Sized>(
        &self,
        annuities: &[Annuity],
        curves: &P,
    ) -> PricingResult<MultiCurrencyAmount> {
        self.price_batch(annuities, curves)
            .into_iter()
            .try_fold(MultiCurrencyAmount::new(), |total, pv| Ok(total.plus_all(&pv?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::instruments::FixedPayment;
    use accrual_core::{Currency, Date};
    use accrual_curves::{MulticurveProvider, YieldCurve};
    use approx::assert_relative_eq;

    fn curves() -> MulticurveProvider {
        MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
            .curve(YieldCurve::flat("EUR-ESTR", 0.025).unwrap())
            .discounting(Currency::EUR, "EUR-ESTR")
            .build()
            .unwrap()
    }

    fn annuities(n: usize) -> Vec<Annuity> {
        (0..n)
            .map(|i| {
                Annuity::default()
                    .with_coupon(FixedPayment::new(Currency::EUR, 0.5 + i as f64 * 0.1, 100.0))
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let curves = curves();
        let batch = annuities(20);
        let sequential = BatchPricer::new(&SensitivityConfig::default().with_parallel_threshold(1000))
            .unwrap()
            .price_batch(&batch, &curves);
        let parallel = BatchPricer::new(&SensitivityConfig::default().with_parallel_threshold(1))
            .unwrap()
            .price_batch(&batch, &curves);

        for (s, p) in sequential.iter().zip(&parallel) {
            let (s, p) = (s.as_ref().unwrap(), p.as_ref().unwrap());
            assert_eq!(s.amount(Currency::EUR), p.amount(Currency::EUR));
        }
    }

    #[test]
    fn test_total_and_errors() {
        let curves = curves();
        let pricer = BatchPricer::default();
        let batch = annuities(3);
        let total = pricer.total_present_value(&batch, &curves).unwrap();
        let expected: f64 = [0.5, 0.6, 0.7]
            .iter()
            .map(|t| 100.0 * (-0.025_f64 * t).exp())
            .sum();
        assert_relative_eq!(total.amount(Currency::EUR), expected, epsilon = 1e-10);

        let bad = vec![Annuity::default().with_coupon(FixedPayment::new(Currency::GBP, 1.0, 1.0))];
        assert!(matches!(
            pricer.total_present_value(&bad, &curves),
            Err(PricingError::Curve(_))
        ));
        assert_eq!(pricer.sensitivity_batch(&batch, &curves).len(), 3);
    }

    #[test]
    fn test_invalid_config() {
        let config = SensitivityConfig::default().with_bump_size(-1.0);
        assert!(matches!(BatchPricer::new(&config), Err(PricingError::Config(_))));
    }
}
