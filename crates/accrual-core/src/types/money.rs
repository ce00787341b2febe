//! Currency amounts.
//!
//! [`CurrencyAmount`] is a single signed amount in one currency; it is what a
//! single-coupon present value produces. [`MultiCurrencyAmount`] aggregates
//! amounts across currencies, one entry per currency.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Currency;

/// A signed amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// The currency of the amount.
    pub currency: Currency,
    /// The amount.
    pub amount: f64,
}

impl CurrencyAmount {
    /// Creates a new currency amount.
    #[must_use]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ.
    pub fn plus(&self, other: CurrencyAmount) -> CoreResult<Self> {
        if self.currency != other.currency {
            return Err(CoreError::currency_mismatch(self.currency, other.currency));
        }
        Ok(Self::new(self.currency, self.amount + other.amount))
    }

    /// Scales the amount by a factor.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::new(self.currency, self.amount * factor)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// Amounts in several currencies, at most one entry per currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// Creates an empty amount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a multi-currency amount holding a single entry.
    #[must_use]
    pub fn of(amount: CurrencyAmount) -> Self {
        Self::new().plus(amount)
    }

    /// Adds an amount; amounts in the same currency are summed.
    #[must_use]
    pub fn plus(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency).or_insert(0.0) += amount.amount;
        self
    }

    /// Adds every entry of another multi-currency amount.
    #[must_use]
    pub fn plus_all(self, other: &MultiCurrencyAmount) -> Self {
        other.iter().fold(self, |acc, amount| acc.plus(amount))
    }

    /// Scales every entry by a factor.
    #[must_use]
    pub fn multiplied_by(mut self, factor: f64) -> Self {
        for value in self.amounts.values_mut() {
            *value *= factor;
        }
        self
    }

    /// Returns the amount for a currency, zero when absent.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Returns the entry for a currency, if present.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|&amount| CurrencyAmount::new(currency, amount))
    }

    /// Returns the currencies present, in sorted order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Iterates over the entries, in currency order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(&currency, &amount)| CurrencyAmount::new(currency, amount))
    }

    /// Number of currencies present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Returns true if no currency is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl From<CurrencyAmount> for MultiCurrencyAmount {
    fn from(amount: CurrencyAmount) -> Self {
        Self::of(amount)
    }
}
