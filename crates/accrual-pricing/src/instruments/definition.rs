//! Dated compounded overnight coupons and their conversion to time-based coupons.
//!
//! A [`CompoundedOvernightDefinition`] is the coupon as traded: dates, a
//! notional and an index. At a valuation date it becomes a priceable
//! [`Coupon`]: sub-periods that have already fixed are folded into the
//! accrued notional, the remaining ones become times.

use std::collections::BTreeMap;

use accrual_core::daycounts::{Act365Fixed, DayCount};
use accrual_core::{Currency, Date};
use accrual_curves::RateIndex;
use serde::{Deserialize, Serialize};

use super::{CompoundedOvernightCoupon, Coupon, FixedPayment};
use crate::error::{PricingError, PricingResult};

/// Published overnight fixings by fixing date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixingSeries {
    fixings: BTreeMap<Date, f64>,
}

impl FixingSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a fixing.
    #[must_use]
    pub fn with_fixing(mut self, date: Date, rate: f64) -> Self {
        self.fixings.insert(date, rate);
        self
    }

    /// The fixing on `date`, if published.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.fixings.get(&date).copied()
    }

    /// Number of fixings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixings.len()
    }

    /// Returns true if no fixing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixings.is_empty()
    }
}

impl FromIterator<(Date, f64)> for FixingSeries {
    fn from_iter<I: IntoIterator<Item = (Date, f64)>>(iter: I) -> Self {
        Self {
            fixings: iter.into_iter().collect(),
        }
    }
}

/// A compounded overnight coupon described by dates.
///
/// `fixing_period_dates` holds `n + 1` increasing dates delimiting `n`
/// sub-periods; each sub-period fixes on its start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompoundedOvernightDefinitionData")]
pub struct CompoundedOvernightDefinition {
    currency: Currency,
    payment_date: Date,
    notional: f64,
    index: RateIndex,
    fixing_period_dates: Vec<Date>,
    fixing_period_accrual_factors: Vec<f64>,
}

/// Wire form of [`CompoundedOvernightDefinition`]. Accrual factors are
/// recomputed from the dates, so serialized ones are ignored.
#[derive(Deserialize)]
struct CompoundedOvernightDefinitionData {
    currency: Currency,
    payment_date: Date,
    notional: f64,
    index: RateIndex,
    fixing_period_dates: Vec<Date>,
}

impl TryFrom<CompoundedOvernightDefinitionData> for CompoundedOvernightDefinition {
    type Error = PricingError;

    fn try_from(data: CompoundedOvernightDefinitionData) -> PricingResult<Self> {
        Self::new(
            data.currency,
            data.payment_date,
            data.notional,
            data.index,
            data.fixing_period_dates,
        )
    }
}

impl CompoundedOvernightDefinition {
    /// Creates a definition; accrual factors follow the index day count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if fewer than two dates are given, the
    /// dates are not strictly increasing, or the index currency differs from
    /// the payment currency.
    pub fn new(
        currency: Currency,
        payment_date: Date,
        notional: f64,
        index: RateIndex,
        fixing_period_dates: Vec<Date>,
    ) -> PricingResult<Self> {
        if fixing_period_dates.len() < 2 {
            return Err(PricingError::invalid_argument(
                "at least two fixing period dates are required",
            ));
        }
        if let Some(w) = fixing_period_dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PricingError::invalid_argument(format!(
                "fixing period dates must increase: {} then {}",
                w[0], w[1]
            )));
        }
        if index.currency() != currency {
            return Err(PricingError::invalid_argument(format!(
                "index {} is in {}, coupon pays {}",
                index,
                index.currency(),
                currency
            )));
        }

        let day_count = index.day_count();
        let fixing_period_accrual_factors = fixing_period_dates
            .windows(2)
            .map(|w| day_count.year_fraction(w[0], w[1]))
            .collect();

        Ok(Self {
            currency,
            payment_date,
            notional,
            index,
            fixing_period_dates,
            fixing_period_accrual_factors,
        })
    }

    /// Payment currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Signed notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// The overnight index.
    #[must_use]
    pub fn index(&self) -> &RateIndex {
        &self.index
    }

    /// Sub-period boundary dates.
    #[must_use]
    pub fn fixing_period_dates(&self) -> &[Date] {
        &self.fixing_period_dates
    }

    /// Sub-period accrual factors under the index day count.
    #[must_use]
    pub fn fixing_period_accrual_factors(&self) -> &[f64] {
        &self.fixing_period_accrual_factors
    }

    /// Converts to a priceable coupon at `valuation_date`.
    ///
    /// Sub-periods starting before the valuation date must have a fixing;
    /// a sub-period starting on the valuation date uses its fixing when one
    /// is published and is projected otherwise. Fixed sub-periods grow the
    /// notional as `N · Π (1 + r_j)^δ_j`. When every sub-period has fixed the
    /// result is a [`FixedPayment`] of the accrued notional.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the coupon has already paid or a required
    /// fixing is missing.
    pub fn to_coupon(&self, valuation_date: Date, fixings: &FixingSeries) -> PricingResult<Coupon> {
        if self.payment_date < valuation_date {
            return Err(PricingError::invalid_argument(format!(
                "coupon paid on {} before valuation date {}",
                self.payment_date, valuation_date
            )));
        }

        let time = |date: Date| Act365Fixed.year_fraction(valuation_date, date);
        let mut notional_accrued = self.notional;
        let mut first_open = self.fixing_period_accrual_factors.len();

        for (i, &delta) in self.fixing_period_accrual_factors.iter().enumerate() {
            let fixing_date = self.fixing_period_dates[i];
            if fixing_date > valuation_date {
                first_open = i;
                break;
            }
            match fixings.get(fixing_date) {
                Some(rate) => notional_accrued *= (1.0 + rate).powf(delta),
                None if fixing_date == valuation_date => {
                    first_open = i;
                    break;
                }
                None => {
                    return Err(PricingError::invalid_argument(format!(
                        "missing {} fixing for {}",
                        self.index, fixing_date
                    )));
                }
            }
        }

        let payment_time = time(self.payment_date);
        let fixed_count = first_open;
        tracing::debug!(
            index = %self.index,
            %valuation_date,
            fixed = fixed_count,
            open = self.fixing_period_accrual_factors.len() - fixed_count,
            notional_accrued,
            "Converted compounded overnight definition"
        );

        if first_open == self.fixing_period_accrual_factors.len() {
            return Ok(Coupon::FixedPayment(FixedPayment::new(
                self.currency,
                payment_time,
                notional_accrued,
            )));
        }

        let open = &self.fixing_period_dates[first_open..];
        let starts = open[..open.len() - 1].iter().map(|&d| time(d)).collect();
        let ends = open[1..].iter().map(|&d| time(d)).collect();
        let accruals = self.fixing_period_accrual_factors[first_open..].to_vec();

        let coupon = CompoundedOvernightCoupon::new(
            self.currency,
            payment_time,
            notional_accrued,
            self.index.clone(),
            starts,
            ends,
            accruals,
        )?;
        Ok(Coupon::CompoundedOvernight(coupon))
    }
}
