//! # Accrual Math
//!
//! Interpolation for the Accrual curves.
//!
//! [`interpolation::LinearInterpolator`] reports, besides the interpolated
//! value, the weight each node carries at a query point. Curve sensitivities
//! are projected onto nodes through those weights.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod interpolation;

pub use error::{MathError, MathResult};
