//! Point bumps of a curve provider for finite-difference checks.
//!
//! A [`BumpedProvider`] wraps a base provider by reference and applies its
//! bumps on the fly; nothing is copied. Bumps are matched on exact times
//! (within [`TIME_TOLERANCE`]), so they move a single point of a curve and
//! leave interpolation between nodes untouched.
//!
//! ```rust
//! use accrual_core::{Currency, Date};
//! use accrual_curves::{CurveProvider, MulticurveProvider, PointBump, YieldCurve};
//!
//! let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
//!     .curve(YieldCurve::flat("USD-OIS", 0.04).unwrap())
//!     .discounting(Currency::USD, "USD-OIS")
//!     .build()
//!     .unwrap();
//!
//! let bumped = PointBump::zero_rate(Currency::USD, 2.0, 0.0001).apply(&curves);
//! let ratio = bumped.discount_factor(Currency::USD, 2.0).unwrap()
//!     / curves.discount_factor(Currency::USD, 2.0).unwrap();
//! assert!((ratio - (-0.0002_f64).exp()).abs() < 1e-15);
//! ```

use accrual_core::Currency;

use crate::error::CurveResult;
use crate::index::RateIndex;
use crate::traits::CurveProvider;

/// Two times closer than this are treated as the same point.
pub const TIME_TOLERANCE: f64 = 1e-12;

fn same_time(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIME_TOLERANCE
}

/// A single-point perturbation of a curve provider.
#[derive(Debug, Clone, PartialEq)]
pub enum PointBump {
    /// Shifts the continuously-compounded zero rate of the currency's
    /// discounting curve at one time: `P(t) → P(t)·exp(-shift·t)`.
    ZeroRate {
        /// Discounting currency.
        currency: Currency,
        /// Bumped time.
        time: f64,
        /// Zero-rate shift.
        shift: f64,
    },
    /// Shifts the simply-compounded forward implied by the currency's
    /// discounting curve over `[start, end]`, by moving `P(end)` only:
    /// `P(end) → P(start) / (P(start)/P(end) + δ·shift)`.
    DiscountForward {
        /// Discounting currency.
        currency: Currency,
        /// Period start.
        start: f64,
        /// Period end.
        end: f64,
        /// Accrual factor `δ` of the forward.
        accrual_factor: f64,
        /// Forward-rate shift.
        shift: f64,
    },
    /// Shifts the index forward rate over `[start, end]` additively.
    IndexForward {
        /// Projected index.
        index: RateIndex,
        /// Period start.
        start: f64,
        /// Period end.
        end: f64,
        /// Forward-rate shift.
        shift: f64,
    },
}

impl PointBump {
    /// Creates a zero-rate bump.
    #[must_use]
    pub fn zero_rate(currency: Currency, time: f64, shift: f64) -> Self {
        Self::ZeroRate {
            currency,
            time,
            shift,
        }
    }

    /// Creates a bump of the forward implied by a discounting curve.
    #[must_use]
    pub fn discount_forward(
        currency: Currency,
        start: f64,
        end: f64,
        accrual_factor: f64,
        shift: f64,
    ) -> Self {
        Self::DiscountForward {
            currency,
            start,
            end,
            accrual_factor,
            shift,
        }
    }

    /// Creates an index forward bump.
    #[must_use]
    pub fn index_forward(index: RateIndex, start: f64, end: f64, shift: f64) -> Self {
        Self::IndexForward {
            index,
            start,
            end,
            shift,
        }
    }

    /// Applies the bump to a base provider.
    #[must_use]
    pub fn apply<P: CurveProvider + ?Sized>(self, base: &P) -> BumpedProvider<'_, P> {
        BumpedProvider::new(base).with_bump(self)
    }
}

/// A provider seen through a list of point bumps.
#[derive(Debug, Clone)]
pub struct BumpedProvider<'a, P: CurveProvider + ?Sized> {
    base: &'a P,
    bumps: Vec<PointBump>,
}

impl<'a, P: CurveProvider + ?Sized> BumpedProvider<'a, P> {
    /// Wraps a base provider with no bumps.
    #[must_use]
    pub fn new(base: &'a P) -> Self {
        Self {
            base,
            bumps: Vec::new(),
        }
    }

    /// Adds a bump.
    #[must_use]
    pub fn with_bump(mut self, bump: PointBump) -> Self {
        self.bumps.push(bump);
        self
    }

    /// Returns the base provider.
    #[must_use]
    pub fn base(&self) -> &P {
        self.base
    }

    /// Returns the bumps, in application order.
    #[must_use]
    pub fn bumps(&self) -> &[PointBump] {
        &self.bumps
    }
}

impl<P: CurveProvider + ?Sized> CurveProvider for BumpedProvider<'_, P> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        let mut df = self.base.discount_factor(currency, t)?;
        for bump in &self.bumps {
            match *bump {
                PointBump::ZeroRate {
                    currency: ccy,
                    time,
                    shift,
                } if ccy == currency && same_time(time, t) => {
                    df *= (-shift * t).exp();
                }
                PointBump::DiscountForward {
                    currency: ccy,
                    start,
                    end,
                    accrual_factor,
                    shift,
                } if ccy == currency && same_time(end, t) => {
                    let df_start = self.base.discount_factor(currency, start)?;
                    df = df_start / (df_start / df + accrual_factor * shift);
                }
                _ => {}
            }
        }
        Ok(df)
    }

    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str> {
        self.base.discount_curve_name(currency)
    }

    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str> {
        self.base.forward_curve_name(index)
    }

    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        let mut rate = self.base.forward_rate(index, start, end, accrual_factor)?;
        for bump in &self.bumps {
            if let PointBump::IndexForward {
                index: bumped,
                start: s,
                end: e,
                shift,
            } = bump
            {
                if bumped == index && same_time(*s, start) && same_time(*e, end) {
                    rate += shift;
                }
            }
        }
        Ok(rate)
    }
}
