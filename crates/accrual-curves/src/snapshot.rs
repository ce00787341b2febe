//! Serializable market snapshot.
//!
//! A snapshot is the plain-data form of a [`MulticurveProvider`]: curve nodes
//! plus the currency and index assignments. It is what upstream market data
//! hands to the pricing core.

use accrual_core::{Currency, Date};
use serde::{Deserialize, Serialize};

use crate::curves::CurveDefinition;
use crate::error::CurveResult;
use crate::index::RateIndex;
use crate::provider::MulticurveProvider;

/// Assigns a discounting curve to a currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountingAssignment {
    /// Currency discounted.
    pub currency: Currency,
    /// Curve name.
    pub curve: String,
}

/// Assigns a forward curve to an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardAssignment {
    /// Index projected.
    pub index: RateIndex,
    /// Curve name.
    pub curve: String,
}

/// Curves and curve assignments at a valuation date.
///
/// # Example
///
/// ```rust
/// use accrual_core::Currency;
/// use accrual_curves::{CurveProvider, MarketSnapshot};
///
/// let json = r#"{
///     "valuation_date": "2025-01-02",
///     "curves": [{ "name": "USD-OIS", "times": [1.0, 5.0], "zero_rates": [0.042, 0.04] }],
///     "discounting": [{ "currency": "USD", "curve": "USD-OIS" }],
///     "forwards": []
/// }"#;
///
/// let curves = MarketSnapshot::from_json_str(json).unwrap().into_provider().unwrap();
/// assert_eq!(curves.discount_curve_name(Currency::USD).unwrap(), "USD-OIS");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Valuation date curve times are measured from.
    pub valuation_date: Date,
    /// Curve nodes.
    pub curves: Vec<CurveDefinition>,
    /// Discounting curve per currency.
    #[serde(default)]
    pub discounting: Vec<DiscountingAssignment>,
    /// Forward curve per index.
    #[serde(default)]
    pub forwards: Vec<ForwardAssignment>,
}

impl MarketSnapshot {
    /// Parses a snapshot from JSON.
    pub fn from_json_str(json: &str) -> CurveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json_string(&self) -> CurveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Captures a provider as a snapshot.
    #[must_use]
    pub fn from_provider(curves: &MulticurveProvider) -> Self {
        let mut discounting: Vec<_> = curves
            .discount_assignments()
            .map(|(currency, curve)| DiscountingAssignment {
                currency,
                curve: curve.to_string(),
            })
            .collect();
        discounting.sort_by_key(|a| a.currency);

        let mut forwards: Vec<_> = curves
            .forward_assignments()
            .map(|(index, curve)| ForwardAssignment {
                index: index.clone(),
                curve: curve.to_string(),
            })
            .collect();
        forwards.sort_by(|a, b| a.index.name().cmp(b.index.name()));

        Self {
            valuation_date: curves.valuation_date(),
            curves: curves
                .curve_names()
                .into_iter()
                .filter_map(|name| curves.curve(name).ok())
                .map(CurveDefinition::from)
                .collect(),
            discounting,
            forwards,
        }
    }

    /// Builds the curves and the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if a curve definition is invalid or an assignment
    /// names a curve that is not in the snapshot.
    pub fn into_provider(self) -> CurveResult<MulticurveProvider> {
        let mut builder = MulticurveProvider::builder(self.valuation_date);
        for definition in &self.curves {
            builder = builder.curve(definition.build()?);
        }
        for assignment in self.discounting {
            builder = builder.discounting(assignment.currency, assignment.curve);
        }
        for assignment in self.forwards {
            builder = builder.forward(assignment.index, assignment.curve);
        }
        builder.build()
    }
}
