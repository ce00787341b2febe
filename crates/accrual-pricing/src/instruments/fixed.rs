//! Fixed payments and fixed-rate coupons.

use accrual_core::Currency;
use serde::{Deserialize, Serialize};

/// A known amount paid at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPayment {
    /// Payment currency.
    pub currency: Currency,
    /// Payment time.
    pub payment_time: f64,
    /// Signed amount paid.
    pub amount: f64,
}

impl FixedPayment {
    /// Creates a fixed payment.
    #[must_use]
    pub fn new(currency: Currency, payment_time: f64, amount: f64) -> Self {
        Self {
            currency,
            payment_time,
            amount,
        }
    }
}

/// A coupon paying `notional · rate · δ` at the payment time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCoupon {
    /// Payment currency.
    pub currency: Currency,
    /// Payment time.
    pub payment_time: f64,
    /// Payment accrual factor `δ`.
    pub payment_accrual_factor: f64,
    /// Signed notional.
    pub notional: f64,
    /// Fixed rate.
    pub rate: f64,
}

impl FixedCoupon {
    /// Creates a fixed coupon.
    #[must_use]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_accrual_factor: f64,
        notional: f64,
        rate: f64,
    ) -> Self {
        Self {
            currency,
            payment_time,
            payment_accrual_factor,
            notional,
            rate,
        }
    }

    /// The amount paid.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.notional * self.rate * self.payment_accrual_factor
    }

    /// The coupon as a fixed payment of its amount.
    #[must_use]
    pub fn to_fixed_payment(&self) -> FixedPayment {
        FixedPayment::new(self.currency, self.payment_time, self.amount())
    }
}
