//! Discounting present values and analytic curve sensitivities for interest
//! rate coupons.
//!
//! The central piece is [`CompoundedOvernightDiscountingMethod`], which prices
//! a coupon paying the daily-compounded overnight rate over a list of fixing
//! periods and returns its derivative to the discounting and forward curves
//! from a single backward sweep. Fixed payments, fixed coupons and term-index
//! coupons are priced by the same scheme so that legs mixing them can be
//! valued together.
//!
//! # Modules
//!
//! - [`instruments`]: coupons, annuities and the dated overnight definition
//! - [`methods`]: one discounting method per coupon type
//! - [`calculators`]: dispatch over [`Coupon`](instruments::Coupon) and
//!   [`Annuity`](instruments::Annuity)
//! - [`batch`]: many annuities at once, in parallel above a threshold
//! - [`valuation`]: requests assembled piece by piece
//! - [`fd`]: bump-and-reprice checks of the analytic sensitivities
//!
//! # Example
//!
//! ```rust
//! use accrual_core::{Currency, Date};
//! use accrual_curves::{CurveProvider, MulticurveProvider, RateIndex, YieldCurve};
//! use accrual_pricing::prelude::*;
//!
//! let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
//!     .curve(YieldCurve::new("BRL-CDI", vec![0.25, 1.0, 2.0], vec![0.115, 0.12, 0.122]).unwrap())
//!     .discounting(Currency::BRL, "BRL-CDI")
//!     .forward(RateIndex::cdi(), "BRL-CDI")
//!     .build()
//!     .unwrap();
//!
//! let coupon = CompoundedOvernightCoupon::new(
//!     Currency::BRL,
//!     1.0,
//!     1_000_000.0,
//!     RateIndex::cdi(),
//!     vec![0.0, 0.5],
//!     vec![0.5, 1.0],
//!     vec![0.5, 0.5],
//! )
//! .unwrap();
//!
//! let method = CompoundedOvernightDiscountingMethod;
//! let pv = method.present_value(&coupon, &curves).unwrap();
//! let sensitivity = method.present_value_curve_sensitivity(&coupon, &curves).unwrap();
//!
//! // Compounding from today to the payment date cancels the discounting.
//! assert!((pv.amount(Currency::BRL) - 1_000_000.0).abs() < 1e-6);
//! assert_eq!(sensitivity.get(Currency::BRL).unwrap().forward()["BRL-CDI"].len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

pub mod batch;
pub mod calculators;
pub mod error;
pub mod fd;
pub mod instruments;
pub mod methods;
pub mod valuation;

pub use batch::BatchPricer;
pub use calculators::{
    PresentValueCurveSensitivityDiscountingCalculator, PresentValueDiscountingCalculator,
};
pub use error::{PricingError, PricingResult};
pub use fd::{FiniteDifferenceChecker, SensitivityMismatch};
pub use methods::{
    CompoundedOvernightDiscountingMethod, DiscountingMethod, FixedCouponDiscountingMethod,
    FixedPaymentDiscountingMethod, IborCouponDiscountingMethod,
};
pub use valuation::Valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::BatchPricer;
    pub use crate::calculators::{
        PresentValueCurveSensitivityDiscountingCalculator, PresentValueDiscountingCalculator,
    };
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::fd::{FiniteDifferenceChecker, SensitivityMismatch};
    pub use crate::instruments::{
        Annuity, CompoundedOvernightCoupon, CompoundedOvernightDefinition, Coupon, FixedCoupon,
        FixedPayment, FixingSeries, IborCoupon,
    };
    pub use crate::methods::{
        CompoundedOvernightDiscountingMethod, DiscountingMethod, FixedCouponDiscountingMethod,
        FixedPaymentDiscountingMethod, IborCouponDiscountingMethod,
    };
    pub use crate::valuation::Valuation;
}
