//! Instruments priced by discounting.
//!
//! Coupons here are expressed in times (year fractions from the valuation
//! date), except [`CompoundedOvernightDefinition`] which is dated and
//! converts to a [`Coupon`] at a valuation date.

mod coupon;
mod definition;
mod fixed;
mod ibor;
mod overnight;

pub use coupon::{Annuity, Coupon};
pub use definition::{CompoundedOvernightDefinition, FixingSeries};
pub use fixed::{FixedCoupon, FixedPayment};
pub use ibor::IborCoupon;
pub use overnight::CompoundedOvernightCoupon;
