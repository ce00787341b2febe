//! Point sensitivities to discount factors and forward rates.
//!
//! A point sensitivity is the derivative of a value with respect to a curve
//! quantity at a specific time, before projection onto curve parameters:
//!
//! - discounting entries `(t, v)`: `v = ∂PV/∂z(t)`, the derivative to the
//!   continuously-compounded zero rate at `t` (so `-t·df·∂PV/∂df`);
//! - forward entries [`ForwardSensitivity`]: the derivative to the
//!   simply-compounded forward over `[start, end]`.

use std::collections::BTreeMap;

use accrual_core::Currency;
use serde::{Deserialize, Serialize};

/// Sensitivity to the simply-compounded forward rate over one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardSensitivity {
    /// Period start time.
    pub start: f64,
    /// Period end time.
    pub end: f64,
    /// Accrual factor of the forward.
    pub accrual_factor: f64,
    /// `∂PV/∂F`.
    pub value: f64,
}

impl ForwardSensitivity {
    /// Creates a forward sensitivity.
    #[must_use]
    pub fn new(start: f64, end: f64, accrual_factor: f64, value: f64) -> Self {
        Self {
            start,
            end,
            accrual_factor,
            value,
        }
    }

    /// `∂F/∂z(start)` for `F = (P(start)/P(end) - 1) / δ`, given the two
    /// discount factors of the forward curve.
    #[must_use]
    pub fn derivative_to_start_yield(&self, df_start: f64, df_end: f64) -> f64 {
        -self.start * df_start / (df_end * self.accrual_factor)
    }

    /// `∂F/∂z(end)` for `F = (P(start)/P(end) - 1) / δ`.
    #[must_use]
    pub fn derivative_to_end_yield(&self, df_start: f64, df_end: f64) -> f64 {
        self.end * df_start / (df_end * self.accrual_factor)
    }

    fn same_period(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.accrual_factor == other.accrual_factor
    }
}

/// Point sensitivities to the curves of one currency's pricing.
///
/// Lists keep insertion order until [`cleaned`](Self::cleaned) sorts and
/// merges them.
///
/// # Example
///
/// ```rust
/// use accrual_curves::{ForwardSensitivity, MulticurveSensitivity};
///
/// let a = MulticurveSensitivity::of_discounting("USD-OIS", vec![(1.0, -100.0)]);
/// let b = MulticurveSensitivity::of_forward(
///     "USD-OIS",
///     vec![ForwardSensitivity::new(0.5, 1.0, 0.5, 2_000.0)],
/// );
/// let total = a.plus(&b).multiplied_by(2.0);
/// assert_eq!(total.discounting()["USD-OIS"], vec![(1.0, -200.0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MulticurveSensitivity {
    discounting: BTreeMap<String, Vec<(f64, f64)>>,
    forward: BTreeMap<String, Vec<ForwardSensitivity>>,
}

impl MulticurveSensitivity {
    /// Creates an empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sensitivity with discounting entries on one curve.
    #[must_use]
    pub fn of_discounting(curve: impl Into<String>, entries: Vec<(f64, f64)>) -> Self {
        let mut sensitivity = Self::new();
        sensitivity.discounting.insert(curve.into(), entries);
        sensitivity
    }

    /// Creates a sensitivity with forward entries on one curve.
    #[must_use]
    pub fn of_forward(curve: impl Into<String>, entries: Vec<ForwardSensitivity>) -> Self {
        let mut sensitivity = Self::new();
        sensitivity.forward.insert(curve.into(), entries);
        sensitivity
    }

    /// Creates a sensitivity from both maps.
    #[must_use]
    pub fn from_maps(
        discounting: BTreeMap<String, Vec<(f64, f64)>>,
        forward: BTreeMap<String, Vec<ForwardSensitivity>>,
    ) -> Self {
        Self {
            discounting,
            forward,
        }
    }

    /// Discounting entries by curve name.
    #[must_use]
    pub fn discounting(&self) -> &BTreeMap<String, Vec<(f64, f64)>> {
        &self.discounting
    }

    /// Forward entries by curve name.
    #[must_use]
    pub fn forward(&self) -> &BTreeMap<String, Vec<ForwardSensitivity>> {
        &self.forward
    }

    /// Returns true if neither map has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discounting.values().all(Vec::is_empty) && self.forward.values().all(Vec::is_empty)
    }

    /// Concatenates the entries of `other` after those of `self`, curve by curve.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (name, entries) in &other.discounting {
            result
                .discounting
                .entry(name.clone())
                .or_default()
                .extend_from_slice(entries);
        }
        for (name, entries) in &other.forward {
            result
                .forward
                .entry(name.clone())
                .or_default()
                .extend_from_slice(entries);
        }
        result
    }

    /// Scales every entry.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        let discounting = self
            .discounting
            .iter()
            .map(|(name, entries)| {
                let scaled = entries.iter().map(|&(t, v)| (t, v * factor)).collect();
                (name.clone(), scaled)
            })
            .collect();
        let forward = self
            .forward
            .iter()
            .map(|(name, entries)| {
                let scaled = entries
                    .iter()
                    .map(|s| ForwardSensitivity {
                        value: s.value * factor,
                        ..*s
                    })
                    .collect();
                (name.clone(), scaled)
            })
            .collect();
        Self {
            discounting,
            forward,
        }
    }

    /// Sorts entries by time, sums entries at identical times (identical
    /// periods for forwards) and drops entries with `|value| <= tolerance`.
    #[must_use]
    pub fn cleaned(&self, tolerance: f64) -> Self {
        let mut discounting = BTreeMap::new();
        for (name, entries) in &self.discounting {
            let mut sorted = entries.clone();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
            for (t, v) in sorted {
                match merged.last_mut() {
                    Some(last) if last.0 == t => last.1 += v,
                    _ => merged.push((t, v)),
                }
            }
            merged.retain(|&(_, v)| v.abs() > tolerance);
            if !merged.is_empty() {
                discounting.insert(name.clone(), merged);
            }
        }

        let mut forward = BTreeMap::new();
        for (name, entries) in &self.forward {
            let mut sorted = entries.clone();
            sorted.sort_by(|a, b| {
                a.start
                    .total_cmp(&b.start)
                    .then(a.end.total_cmp(&b.end))
                    .then(a.accrual_factor.total_cmp(&b.accrual_factor))
            });
            let mut merged: Vec<ForwardSensitivity> = Vec::with_capacity(sorted.len());
            for s in sorted {
                match merged.last_mut() {
                    Some(last) if last.same_period(&s) => last.value += s.value,
                    _ => merged.push(s),
                }
            }
            merged.retain(|s| s.value.abs() > tolerance);
            if !merged.is_empty() {
                forward.insert(name.clone(), merged);
            }
        }

        Self {
            discounting,
            forward,
        }
    }
}

/// Point sensitivities grouped by the currency they are expressed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCurrencyMulticurveSensitivity {
    sensitivities: BTreeMap<Currency, MulticurveSensitivity>,
}

impl MultiCurrencyMulticurveSensitivity {
    /// Creates an empty sensitivity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sensitivity holding one currency.
    #[must_use]
    pub fn of(currency: Currency, sensitivity: MulticurveSensitivity) -> Self {
        Self::new().plus(currency, &sensitivity)
    }

    /// Adds a sensitivity in `currency`.
    #[must_use]
    pub fn plus(mut self, currency: Currency, sensitivity: &MulticurveSensitivity) -> Self {
        let entry = self.sensitivities.entry(currency).or_default();
        *entry = entry.plus(sensitivity);
        self
    }

    /// Adds every currency of another multi-currency sensitivity.
    #[must_use]
    pub fn plus_all(self, other: &Self) -> Self {
        other
            .sensitivities
            .iter()
            .fold(self, |acc, (&ccy, s)| acc.plus(ccy, s))
    }

    /// Scales every entry.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(&ccy, s)| (ccy, s.multiplied_by(factor)))
                .collect(),
        }
    }

    /// Cleans every currency's sensitivity; see [`MulticurveSensitivity::cleaned`].
    #[must_use]
    pub fn cleaned(&self, tolerance: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(&ccy, s)| (ccy, s.cleaned(tolerance)))
                .filter(|(_, s)| !s.is_empty())
                .collect(),
        }
    }

    /// Returns the sensitivity in `currency`, if any.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Option<&MulticurveSensitivity> {
        self.sensitivities.get(&currency)
    }

    /// Iterates over currencies in order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, &MulticurveSensitivity)> {
        self.sensitivities.iter().map(|(&ccy, s)| (ccy, s))
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// Returns true if no currency is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }
}
