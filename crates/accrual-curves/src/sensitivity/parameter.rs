//! Projection of point sensitivities onto curve parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::provider::MulticurveProvider;

use super::point::{MultiCurrencyMulticurveSensitivity, MulticurveSensitivity};

/// Sensitivities to the zero-rate nodes of each curve.
///
/// Vectors are indexed like [`YieldCurve::node_times`](crate::YieldCurve::node_times).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSensitivity {
    sensitivities: BTreeMap<String, Vec<f64>>,
}

impl ParameterSensitivity {
    /// Creates an empty parameter sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps node sensitivities already computed per curve.
    #[must_use]
    pub fn from_map(sensitivities: BTreeMap<String, Vec<f64>>) -> Self {
        Self { sensitivities }
    }

    /// Node sensitivities of a curve, if present.
    #[must_use]
    pub fn get(&self, curve: &str) -> Option<&[f64]> {
        self.sensitivities.get(curve).map(Vec::as_slice)
    }

    /// Curve names present, sorted.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    /// Sum of all node sensitivities of a curve (its parallel sensitivity).
    #[must_use]
    pub fn total(&self, curve: &str) -> f64 {
        self.get(curve).map_or(0.0, |v| v.iter().sum())
    }

    /// Adds node sensitivities element-wise.
    ///
    /// # Errors
    ///
    /// Returns an error if the same curve appears with different node counts.
    pub fn plus(&self, other: &Self) -> CurveResult<Self> {
        let mut result = self.clone();
        for (name, values) in &other.sensitivities {
            result.add_to(name, values)?;
        }
        Ok(result)
    }

    /// Scales every node sensitivity.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(name, v)| (name.clone(), v.iter().map(|x| x * factor).collect()))
                .collect(),
        }
    }

    fn add_to(&mut self, curve: &str, values: &[f64]) -> CurveResult<()> {
        let entry = self
            .sensitivities
            .entry(curve.to_string())
            .or_insert_with(|| vec![0.0; values.len()]);
        if entry.len() != values.len() {
            return Err(CurveError::invalid_value(format!(
                "curve {curve} has {} nodes, got {} sensitivities",
                entry.len(),
                values.len()
            )));
        }
        for (acc, v) in entry.iter_mut().zip(values) {
            *acc += v;
        }
        Ok(())
    }
}

/// Projects point sensitivities onto the zero-rate nodes of a provider's curves.
///
/// Discounting entries `(t, v)` are spread with the interpolation weights of
/// `z(t)`. Forward entries are first converted to sensitivities to `z(start)`
/// and `z(end)` of the named curve, then spread the same way.
///
/// # Example
///
/// ```rust
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{
///     MulticurveProvider, MulticurveSensitivity, ParameterSensitivityCalculator, YieldCurve,
/// };
///
/// let curve = YieldCurve::new("USD-OIS", vec![1.0, 2.0], vec![0.04, 0.045]).unwrap();
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(curve)
///     .discounting(Currency::USD, "USD-OIS")
///     .build()
///     .unwrap();
///
/// let point = MulticurveSensitivity::of_discounting("USD-OIS", vec![(1.5, -100.0)]);
/// let nodes = ParameterSensitivityCalculator::new(&curves).calculate(&point).unwrap();
/// assert_eq!(nodes.get("USD-OIS").unwrap(), &[-50.0, -50.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParameterSensitivityCalculator<'a> {
    curves: &'a MulticurveProvider,
}

impl<'a> ParameterSensitivityCalculator<'a> {
    /// Creates a calculator over a provider's curves.
    #[must_use]
    pub fn new(curves: &'a MulticurveProvider) -> Self {
        Self { curves }
    }

    /// Projects a single-currency point sensitivity.
    pub fn calculate(&self, sensitivity: &MulticurveSensitivity) -> CurveResult<ParameterSensitivity> {
        let mut result = ParameterSensitivity::new();

        for (name, entries) in sensitivity.discounting() {
            let curve = self.curves.curve(name)?;
            let mut nodes = vec![0.0; curve.parameter_count()];
            for &(t, value) in entries {
                let weights = curve.zero_rate_node_weights(t)?;
                for (node, w) in nodes.iter_mut().zip(weights) {
                    *node += value * w;
                }
            }
            result.add_to(name, &nodes)?;
        }

        for (name, entries) in sensitivity.forward() {
            let curve = self.curves.curve(name)?;
            let mut nodes = vec![0.0; curve.parameter_count()];
            for s in entries {
                let df_start = curve.discount_factor(s.start)?;
                let df_end = curve.discount_factor(s.end)?;
                let bar_start = s.value * s.derivative_to_start_yield(df_start, df_end);
                let bar_end = s.value * s.derivative_to_end_yield(df_start, df_end);
                let w_start = curve.zero_rate_node_weights(s.start)?;
                let w_end = curve.zero_rate_node_weights(s.end)?;
                for ((node, ws), we) in nodes.iter_mut().zip(w_start).zip(w_end) {
                    *node += bar_start * ws + bar_end * we;
                }
            }
            result.add_to(name, &nodes)?;
        }

        tracing::trace!(curves = result.sensitivities.len(), "Projected point sensitivities");
        Ok(result)
    }

    /// Projects a multi-currency point sensitivity, one result per currency.
    pub fn calculate_multi_currency(
        &self,
        sensitivity: &MultiCurrencyMulticurveSensitivity,
    ) -> CurveResult<BTreeMap<accrual_core::Currency, ParameterSensitivity>> {
        sensitivity
            .iter()
            .map(|(ccy, s)| Ok((ccy, self.calculate(s)?)))
            .collect()
    }
}
