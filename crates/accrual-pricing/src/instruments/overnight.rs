//! Coupon paying an overnight rate compounded over sub-periods.

use accrual_core::Currency;
use accrual_curves::RateIndex;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// A coupon on an overnight index, compounded annually over its fixing
/// sub-periods and paid once (the CDI convention).
///
/// `notional_accrued` is the notional already grown by any fixed sub-periods;
/// only sub-periods still to fix are listed. All times are year fractions
/// from the valuation date.
///
/// The pay-off is `N · Π (1 + F_i)^δ_i` where `F_i` is the annually
/// compounded overnight rate over sub-period `i`.
///
/// # Example
///
/// ```rust
/// use accrual_core::Currency;
/// use accrual_curves::RateIndex;
/// use accrual_pricing::instruments::CompoundedOvernightCoupon;
///
/// let coupon = CompoundedOvernightCoupon::new(
///     Currency::BRL,
///     1.02,
///     1_000_000.0,
///     RateIndex::cdi(),
///     vec![0.0, 0.5],
///     vec![0.5, 1.0],
///     vec![0.5, 0.5],
/// )
/// .unwrap();
/// assert_eq!(coupon.period_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompoundedOvernightCouponData")]
pub struct CompoundedOvernightCoupon {
    currency: Currency,
    payment_time: f64,
    notional_accrued: f64,
    index: RateIndex,
    fixing_period_start_times: Vec<f64>,
    fixing_period_end_times: Vec<f64>,
    fixing_period_accrual_factors: Vec<f64>,
}

/// Wire form of [`CompoundedOvernightCoupon`], checked by `new` on the way in.
#[derive(Deserialize)]
struct CompoundedOvernightCouponData {
    currency: Currency,
    payment_time: f64,
    notional_accrued: f64,
    index: RateIndex,
    fixing_period_start_times: Vec<f64>,
    fixing_period_end_times: Vec<f64>,
    fixing_period_accrual_factors: Vec<f64>,
}

impl TryFrom<CompoundedOvernightCouponData> for CompoundedOvernightCoupon {
    type Error = PricingError;

    fn try_from(data: CompoundedOvernightCouponData) -> PricingResult<Self> {
        Self::new(
            data.currency,
            data.payment_time,
            data.notional_accrued,
            data.index,
            data.fixing_period_start_times,
            data.fixing_period_end_times,
            data.fixing_period_accrual_factors,
        )
    }
}

impl CompoundedOvernightCoupon {
    /// Creates a coupon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the three period arrays are empty or of
    /// different lengths, an end time precedes its start time, or an accrual
    /// factor is not strictly positive.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        notional_accrued: f64,
        index: RateIndex,
        fixing_period_start_times: Vec<f64>,
        fixing_period_end_times: Vec<f64>,
        fixing_period_accrual_factors: Vec<f64>,
    ) -> PricingResult<Self> {
        let n = fixing_period_accrual_factors.len();
        if n == 0 {
            return Err(PricingError::invalid_argument(
                "a compounded coupon needs at least one fixing period",
            ));
        }
        if fixing_period_start_times.len() != n || fixing_period_end_times.len() != n {
            return Err(PricingError::invalid_argument(format!(
                "fixing period arrays differ in length: {} start times, {} end times, {} accrual factors",
                fixing_period_start_times.len(),
                fixing_period_end_times.len(),
                n
            )));
        }
        for (i, (start, end)) in fixing_period_start_times
            .iter()
            .zip(&fixing_period_end_times)
            .enumerate()
        {
            if end < start {
                return Err(PricingError::invalid_argument(format!(
                    "fixing period {i} ends ({end}) before it starts ({start})"
                )));
            }
        }
        if let Some((i, delta)) = fixing_period_accrual_factors
            .iter()
            .enumerate()
            .find(|(_, &d)| d <= 0.0 || d.is_nan())
        {
            return Err(PricingError::invalid_argument(format!(
                "accrual factor of fixing period {i} must be strictly positive, got {delta}"
            )));
        }

        Ok(Self {
            currency,
            payment_time,
            notional_accrued,
            index,
            fixing_period_start_times,
            fixing_period_end_times,
            fixing_period_accrual_factors,
        })
    }

    /// Payment currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment time.
    #[must_use]
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Notional including the interest of already fixed sub-periods.
    #[must_use]
    pub fn notional_accrued(&self) -> f64 {
        self.notional_accrued
    }

    /// The overnight index.
    #[must_use]
    pub fn index(&self) -> &RateIndex {
        &self.index
    }

    /// Start times of the sub-periods still to fix.
    #[must_use]
    pub fn fixing_period_start_times(&self) -> &[f64] {
        &self.fixing_period_start_times
    }

    /// End times of the sub-periods still to fix.
    #[must_use]
    pub fn fixing_period_end_times(&self) -> &[f64] {
        &self.fixing_period_end_times
    }

    /// Accrual factors of the sub-periods still to fix.
    #[must_use]
    pub fn fixing_period_accrual_factors(&self) -> &[f64] {
        &self.fixing_period_accrual_factors
    }

    /// Number of sub-periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.fixing_period_accrual_factors.len()
    }

    /// Iterates over `(start, end, accrual_factor)` in period order.
    pub fn fixing_periods(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.fixing_period_start_times
            .iter()
            .zip(&self.fixing_period_end_times)
            .zip(&self.fixing_period_accrual_factors)
            .map(|((&s, &e), &d)| (s, e, d))
    }

    /// Returns a copy with a different accrued notional.
    #[must_use]
    pub fn with_notional_accrued(&self, notional_accrued: f64) -> Self {
        Self {
            notional_accrued,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periods() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (vec![0.1, 0.6], vec![0.6, 1.1], vec![0.5, 0.5])
    }

    #[test]
    fn test_valid_coupon() {
        let (s, e, d) = periods();
        let coupon =
            CompoundedOvernightCoupon::new(Currency::BRL, 1.1, -5.0e6, RateIndex::cdi(), s, e, d)
                .unwrap();
        let collected: Vec<_> = coupon.fixing_periods().collect();
        assert_eq!(collected, vec![(0.1, 0.6, 0.5), (0.6, 1.1, 0.5)]);
        assert_eq!(coupon.notional_accrued(), -5.0e6);
        assert_eq!(coupon.with_notional_accrued(1.0).notional_accrued(), 1.0);
    }

    #[test]
    fn test_rejects_malformed_periods() {
        let (s, e, d) = periods();
        let build = |s: Vec<f64>, e: Vec<f64>, d: Vec<f64>| {
            CompoundedOvernightCoupon::new(Currency::BRL, 1.1, 1.0, RateIndex::cdi(), s, e, d)
        };

        assert!(build(vec![], vec![], vec![]).is_err());
        assert!(build(s.clone(), e.clone(), vec![0.5]).is_err());
        assert!(build(vec![0.1, 1.2], e.clone(), d.clone()).is_err());
        assert!(matches!(
            build(s.clone(), e.clone(), vec![0.5, 0.0]),
            Err(PricingError::InvalidArgument { .. })
        ));
        assert!(build(s, e, vec![-0.5, 0.5]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let (s, e, d) = periods();
        let coupon =
            CompoundedOvernightCoupon::new(Currency::BRL, 1.1, 1.0e6, RateIndex::cdi(), s, e, d)
                .unwrap();
        let json = serde_json::to_value(&coupon).unwrap();
        let back: CompoundedOvernightCoupon = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, coupon);

        let mut empty = json.clone();
        for field in [
            "fixing_period_start_times",
            "fixing_period_end_times",
            "fixing_period_accrual_factors",
        ] {
            empty[field] = serde_json::json!([]);
        }
        let err = serde_json::from_value::<CompoundedOvernightCoupon>(empty).unwrap_err();
        assert!(err.to_string().contains("at least one fixing period"));

        let mut ragged = json;
        ragged["fixing_period_accrual_factors"] = serde_json::json!([0.5]);
        assert!(serde_json::from_value::<CompoundedOvernightCoupon>(ragged).is_err());
    }
}
