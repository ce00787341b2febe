//! Coupon on a term index, fixed in advance and paid in arrears.

use accrual_core::Currency;
use accrual_curves::RateIndex;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// A coupon paying `notional · δ · F`, with `F` the index rate fixed over
/// `[fixing_period_start_time, fixing_period_end_time]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IborCouponData")]
pub struct IborCoupon {
    currency: Currency,
    payment_time: f64,
    payment_accrual_factor: f64,
    notional: f64,
    index: RateIndex,
    fixing_period_start_time: f64,
    fixing_period_end_time: f64,
    fixing_accrual_factor: f64,
}

#[derive(Deserialize)]
struct IborCouponData {
    currency: Currency,
    payment_time: f64,
    payment_accrual_factor: f64,
    notional: f64,
    index: RateIndex,
    fixing_period_start_time: f64,
    fixing_period_end_time: f64,
    fixing_accrual_factor: f64,
}

impl TryFrom<IborCouponData> for IborCoupon {
    type Error = PricingError;

    fn try_from(data: IborCouponData) -> PricingResult<Self> {
        Self::new(
            data.currency,
            data.payment_time,
            data.payment_accrual_factor,
            data.notional,
            data.index,
            data.fixing_period_start_time,
            data.fixing_period_end_time,
            data.fixing_accrual_factor,
        )
    }
}

impl IborCoupon {
    /// Creates an ibor coupon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the fixing period is reversed or its
    /// accrual factor is not strictly positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_accrual_factor: f64,
        notional: f64,
        index: RateIndex,
        fixing_period_start_time: f64,
        fixing_period_end_time: f64,
        fixing_accrual_factor: f64,
    ) -> PricingResult<Self> {
        if fixing_period_end_time < fixing_period_start_time {
            return Err(PricingError::invalid_argument(format!(
                "fixing period ends ({fixing_period_end_time}) before it starts ({fixing_period_start_time})"
            )));
        }
        if fixing_accrual_factor <= 0.0 || fixing_accrual_factor.is_nan() {
            return Err(PricingError::invalid_argument(format!(
                "fixing accrual factor must be strictly positive, got {fixing_accrual_factor}"
            )));
        }
        Ok(Self {
            currency,
            payment_time,
            payment_accrual_factor,
            notional,
            index,
            fixing_period_start_time,
            fixing_period_end_time,
            fixing_accrual_factor,
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

    /// Payment accrual factor.
    #[must_use]
    pub fn payment_accrual_factor(&self) -> f64 {
        self.payment_accrual_factor
    }

    /// Signed notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// The term index.
    #[must_use]
    pub fn index(&self) -> &RateIndex {
        &self.index
    }

    /// Fixing period start time.
    #[must_use]
    pub fn fixing_period_start_time(&self) -> f64 {
        self.fixing_period_start_time
    }

    /// Fixing period end time.
    #[must_use]
    pub fn fixing_period_end_time(&self) -> f64 {
        self.fixing_period_end_time
    }

    /// Accrual factor of the fixing period.
    #[must_use]
    pub fn fixing_accrual_factor(&self) -> f64 {
        self.fixing_accrual_factor
    }
}
