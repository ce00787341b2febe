//! Rate indices for the multi-curve framework.
//!
//! An index names the rate that a floating coupon fixes on. The curve
//! provider maps each index to the forward curve that projects it.

use accrual_core::daycounts::DayCountConvention;
use accrual_core::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an index accrues over its fixing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    /// Overnight rate, compounded over the coupon period.
    Overnight,
    /// Term rate fixed once per period.
    Term {
        /// Tenor in months.
        months: u32,
    },
}

/// A floating rate index (SOFR, €STR, SONIA, CDI, EURIBOR 3M, ...).
///
/// # Example
///
/// ```rust
/// use accrual_curves::RateIndex;
/// use accrual_core::Currency;
///
/// let sofr = RateIndex::sofr();
/// assert_eq!(sofr.currency(), Currency::USD);
/// assert!(sofr.is_overnight());
/// assert_eq!(sofr.to_string(), "SOFR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateIndex {
    name: String,
    currency: Currency,
    kind: IndexKind,
    day_count: DayCountConvention,
}

impl RateIndex {
    /// Creates an overnight index.
    #[must_use]
    pub fn overnight(
        name: impl Into<String>,
        currency: Currency,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            kind: IndexKind::Overnight,
            day_count,
        }
    }

    /// Creates a term index with the given tenor in months.
    #[must_use]
    pub fn term(
        name: impl Into<String>,
        currency: Currency,
        months: u32,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            kind: IndexKind::Term { months },
            day_count,
        }
    }

    /// USD Secured Overnight Financing Rate.
    #[must_use]
    pub fn sofr() -> Self {
        Self::overnight("SOFR", Currency::USD, DayCountConvention::Act360)
    }

    /// Euro Short-Term Rate.
    #[must_use]
    pub fn estr() -> Self {
        Self::overnight("ESTR", Currency::EUR, DayCountConvention::Act360)
    }

    /// Sterling Overnight Index Average.
    #[must_use]
    pub fn sonia() -> Self {
        Self::overnight("SONIA", Currency::GBP, DayCountConvention::Act365Fixed)
    }

    /// Brazilian interbank deposit rate, the usual annually compounded overnight index.
    #[must_use]
    pub fn cdi() -> Self {
        Self::overnight("CDI", Currency::BRL, DayCountConvention::Act365Fixed)
    }

    /// EURIBOR 3 month.
    #[must_use]
    pub fn euribor_3m() -> Self {
        Self::term("EURIBOR3M", Currency::EUR, 3, DayCountConvention::Act360)
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the index kind.
    #[must_use]
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Returns the accrual day count of the index.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns true for overnight indices.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        matches!(self.kind, IndexKind::Overnight)
    }
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
