//! The coupon sum type and annuities of coupons.

use accrual_core::Currency;
use serde::{Deserialize, Serialize};

use super::{CompoundedOvernightCoupon, FixedCoupon, FixedPayment, IborCoupon};

/// Any coupon the discounting calculators can price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Coupon {
    /// A known amount.
    FixedPayment(FixedPayment),
    /// A fixed-rate coupon.
    Fixed(FixedCoupon),
    /// A term-index coupon.
    Ibor(IborCoupon),
    /// An annually compounded overnight coupon.
    CompoundedOvernight(CompoundedOvernightCoupon),
}

impl Coupon {
    /// Payment currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        match self {
            Coupon::FixedPayment(c) => c.currency,
            Coupon::Fixed(c) => c.currency,
            Coupon::Ibor(c) => c.currency(),
            Coupon::CompoundedOvernight(c) => c.currency(),
        }
    }

    /// Payment time.
    #[must_use]
    pub fn payment_time(&self) -> f64 {
        match self {
            Coupon::FixedPayment(c) => c.payment_time,
            Coupon::Fixed(c) => c.payment_time,
            Coupon::Ibor(c) => c.payment_time(),
            Coupon::CompoundedOvernight(c) => c.payment_time(),
        }
    }
}

impl From<FixedPayment> for Coupon {
    fn from(c: FixedPayment) -> Self {
        Coupon::FixedPayment(c)
    }
}

impl From<FixedCoupon> for Coupon {
    fn from(c: FixedCoupon) -> Self {
        Coupon::Fixed(c)
    }
}

impl From<IborCoupon> for Coupon {
    fn from(c: IborCoupon) -> Self {
        Coupon::Ibor(c)
    }
}

impl From<CompoundedOvernightCoupon> for Coupon {
    fn from(c: CompoundedOvernightCoupon) -> Self {
        Coupon::CompoundedOvernight(c)
    }
}

/// An ordered leg of coupons, possibly in several currencies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annuity {
    coupons: Vec<Coupon>,
}

impl Annuity {
    /// Creates an annuity from coupons.
    #[must_use]
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// Appends a coupon.
    #[must_use]
    pub fn with_coupon(mut self, coupon: impl Into<Coupon>) -> Self {
        self.coupons.push(coupon.into());
        self
    }

    /// The coupons, in order.
    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Number of coupons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Returns true if the annuity has no coupon.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Distinct payment currencies, sorted.
    #[must_use]
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<_> = self.coupons.iter().map(Coupon::currency).collect();
        currencies.sort_unstable();
        currencies.dedup();
        currencies
    }
}

impl FromIterator<Coupon> for Annuity {
    fn from_iter<I: IntoIterator<Item = Coupon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
