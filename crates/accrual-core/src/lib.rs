//! # Accrual Core
//!
//! Core types for the Accrual interest rate analytics library.
//!
//! This crate provides the foundational building blocks used by the curve and
//! pricing crates:
//!
//! - **Types**: `Currency`, `Date`, `CurrencyAmount`, `MultiCurrencyAmount`
//! - **Day Count Conventions**: ACT/360 and ACT/365 Fixed year fractions
//!
//! ## Example
//!
//! ```rust
//! use accrual_core::prelude::*;
//!
//! let pv = CurrencyAmount::new(Currency::EUR, 1_250.0);
//! let total = MultiCurrencyAmount::of(pv).plus(CurrencyAmount::new(Currency::USD, 10.0));
//! assert_eq!(total.amount(Currency::EUR), 1_250.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Currency, CurrencyAmount, Date, MultiCurrencyAmount};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, CurrencyAmount, Date, MultiCurrencyAmount};
