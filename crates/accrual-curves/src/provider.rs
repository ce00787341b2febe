//! Multi-curve provider backed by interpolated curves.
//!
//! A [`MulticurveProvider`] holds a set of named [`YieldCurve`]s together with
//! two lookup tables: currency → discounting curve and index → forward curve.
//! One curve may serve several roles (a USD OIS curve typically discounts USD
//! cash flows and projects SOFR).

use std::collections::HashMap;
use std::sync::Arc;

use accrual_core::daycounts::{Act365Fixed, DayCount};
use accrual_core::{Currency, Date};

use crate::curves::YieldCurve;
use crate::error::{CurveError, CurveResult};
use crate::index::RateIndex;
use crate::traits::CurveProvider;

/// A multi-curve environment.
///
/// # Thread Safety
///
/// Curves are held behind `Arc` and never mutated; bumped copies share every
/// untouched curve with the original.
///
/// # Example
///
/// ```rust
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{CurveProvider, MulticurveProvider, RateIndex, YieldCurve};
///
/// let ois = YieldCurve::new("USD-OIS", vec![0.5, 1.0, 5.0], vec![0.043, 0.042, 0.040]).unwrap();
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(ois)
///     .discounting(Currency::USD, "USD-OIS")
///     .forward(RateIndex::sofr(), "USD-OIS")
///     .build()
///     .unwrap();
///
/// assert_eq!(curves.discount_curve_name(Currency::USD).unwrap(), "USD-OIS");
/// assert!(curves.discount_factor(Currency::USD, 1.0).unwrap() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MulticurveProvider {
    valuation_date: Date,
    curves: HashMap<String, Arc<YieldCurve>>,
    discounting: HashMap<Currency, String>,
    forwards: HashMap<RateIndex, String>,
}

impl MulticurveProvider {
    /// Creates a builder for a provider valued at `valuation_date`.
    #[must_use]
    pub fn builder(valuation_date: Date) -> MulticurveProviderBuilder {
        MulticurveProviderBuilder::new(valuation_date)
    }

    /// Returns the valuation date all curve times are measured from.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Converts a date to a curve time (ACT/365F from the valuation date).
    #[must_use]
    pub fn time(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.valuation_date, date)
    }

    /// Returns a curve by name.
    pub fn curve(&self, name: &str) -> CurveResult<&YieldCurve> {
        self.curves
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| CurveError::curve_not_found(name))
    }

    /// Returns the names of all curves, sorted.
    #[must_use]
    pub fn curve_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.curves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterates over the currency → discounting curve assignments.
    pub fn discount_assignments(&self) -> impl Iterator<Item = (Currency, &str)> {
        self.discounting
            .iter()
            .map(|(&ccy, name)| (ccy, name.as_str()))
    }

    /// Iterates over the index → forward curve assignments.
    pub fn forward_assignments(&self) -> impl Iterator<Item = (&RateIndex, &str)> {
        self.forwards
            .iter()
            .map(|(index, name)| (index, name.as_str()))
    }

    /// Returns the discounting curve for a currency.
    pub fn discount_curve(&self, currency: Currency) -> CurveResult<&YieldCurve> {
        let name = self.discount_curve_name(currency)?;
        self.curve(name)
    }

    /// Returns the forward curve for an index.
    pub fn forward_curve(&self, index: &RateIndex) -> CurveResult<&YieldCurve> {
        let name = self.forward_curve_name(index)?;
        self.curve(name)
    }

    /// Returns a copy of the provider with the named curve replaced.
    ///
    /// Every role the curve plays (discounting, forward) follows the replacement.
    pub fn with_curve(&self, curve: YieldCurve) -> CurveResult<Self> {
        if !self.curves.contains_key(curve.name()) {
            return Err(CurveError::curve_not_found(curve.name()));
        }
        let mut bumped = self.clone();
        bumped
            .curves
            .insert(curve.name().to_string(), Arc::new(curve));
        Ok(bumped)
    }

    /// Returns a copy of the provider with every curve shifted by `shift`.
    pub fn with_parallel_shift(&self, shift: f64) -> CurveResult<Self> {
        let curves = self
            .curves
            .iter()
            .map(|(name, curve)| Ok((name.clone(), Arc::new(curve.with_parallel_shift(shift)?))))
            .collect::<CurveResult<HashMap<_, _>>>()?;
        Ok(Self {
            curves,
            ..self.clone()
        })
    }
}

impl CurveProvider for MulticurveProvider {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        self.discount_curve(currency)?.discount_factor(t)
    }

    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str> {
        self.discounting
            .get(&currency)
            .map(String::as_str)
            .ok_or_else(|| CurveError::no_discount_curve(currency))
    }

    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str> {
        self.forwards
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CurveError::no_forward_curve(index.name()))
    }

    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        let curve = self.forward_curve(index)?;
        let df_start = curve.discount_factor(start)?;
        let df_end = curve.discount_factor(end)?;
        Ok((df_start / df_end - 1.0) / accrual_factor)
    }
}

/// Builder for [`MulticurveProvider`].
#[derive(Debug, Clone)]
pub struct MulticurveProviderBuilder {
    valuation_date: Date,
    curves: HashMap<String, Arc<YieldCurve>>,
    discounting: HashMap<Currency, String>,
    forwards: HashMap<RateIndex, String>,
}

impl MulticurveProviderBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            curves: HashMap::new(),
            discounting: HashMap::new(),
            forwards: HashMap::new(),
        }
    }

    /// Adds a curve, replacing any curve with the same name.
    #[must_use]
    pub fn curve(mut self, curve: YieldCurve) -> Self {
        self.curves
            .insert(curve.name().to_string(), Arc::new(curve));
        self
    }

    /// Uses the named curve to discount `currency` cash flows.
    #[must_use]
    pub fn discounting(mut self, currency: Currency, curve_name: impl Into<String>) -> Self {
        self.discounting.insert(currency, curve_name.into());
        self
    }

    /// Uses the named curve to project `index`.
    #[must_use]
    pub fn forward(mut self, index: RateIndex, curve_name: impl Into<String>) -> Self {
        self.forwards.insert(index, curve_name.into());
        self
    }

    /// Builds the provider.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if a discounting or forward entry
    /// refers to a curve that was never added.
    pub fn build(self) -> CurveResult<MulticurveProvider> {
        let referenced = self.discounting.values().chain(self.forwards.values());
        for name in referenced {
            if !self.curves.contains_key(name) {
                return Err(CurveError::curve_not_found(name.clone()));
            }
        }

        tracing::debug!(
            valuation_date = %self.valuation_date,
            curves = self.curves.len(),
            currencies = self.discounting.len(),
            indices = self.forwards.len(),
            "Built multi-curve provider"
        );

        Ok(MulticurveProvider {
            valuation_date: self.valuation_date,
            curves: self.curves,
            discounting: self.discounting,
            forwards: self.forwards,
        })
    }
}
