//! # Accrual Curves
//!
//! Market data as seen by the pricing methods.
//!
//! ## Overview
//!
//! - [`CurveProvider`]: the read-only interface pricing code consumes
//!   (discount factors per currency, forward rates per index, curve names)
//! - [`YieldCurve`] and [`MulticurveProvider`]: interpolated zero-rate curves
//!   and the multi-curve environment built from them
//! - [`MarketSnapshot`]: serializable form of a provider
//! - [`PointBump`] / [`BumpedProvider`]: single-point perturbations for
//!   bump-and-reprice checks
//! - [`MulticurveSensitivity`] and friends: point sensitivities and their
//!   projection onto curve nodes
//!
//! ## Quick Start
//!
//! ```rust
//! use accrual_core::{Currency, Date};
//! use accrual_curves::prelude::*;
//!
//! let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
//!     .curve(YieldCurve::new("EUR-ESTR", vec![0.5, 2.0, 10.0], vec![0.028, 0.026, 0.027]).unwrap())
//!     .discounting(Currency::EUR, "EUR-ESTR")
//!     .forward(RateIndex::estr(), "EUR-ESTR")
//!     .build()
//!     .unwrap();
//!
//! let df = curves.discount_factor(Currency::EUR, 1.0).unwrap();
//! let fwd = curves.forward_rate(&RateIndex::estr(), 1.0, 1.25, 0.25).unwrap();
//! assert!(df < 1.0 && fwd > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod bumping;
pub mod curves;
pub mod error;
pub mod index;
pub mod provider;
pub mod sensitivity;
pub mod snapshot;
pub mod traits;

pub use bumping::{BumpedProvider, PointBump};
pub use curves::{CurveDefinition, YieldCurve};
pub use error::{CurveError, CurveResult};
pub use index::{IndexKind, RateIndex};
pub use provider::{MulticurveProvider, MulticurveProviderBuilder};
pub use sensitivity::{
    ForwardSensitivity, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity,
    ParameterSensitivity, ParameterSensitivityCalculator,
};
pub use snapshot::MarketSnapshot;
pub use traits::CurveProvider;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bumping::{BumpedProvider, PointBump};
    pub use crate::curves::{CurveDefinition, YieldCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::index::{IndexKind, RateIndex};
    pub use crate::provider::{MulticurveProvider, MulticurveProviderBuilder};
    pub use crate::sensitivity::{
        ForwardSensitivity, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity,
        ParameterSensitivity, ParameterSensitivityCalculator,
    };
    pub use crate::snapshot::MarketSnapshot;
    pub use crate::traits::CurveProvider;
}
