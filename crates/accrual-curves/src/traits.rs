//! The curve provider interface consumed by the pricing methods.
//!
//! Pricing code sees market data only through [`CurveProvider`]: discount
//! factors per currency, forward rates per index, and the names under which
//! the curves report their sensitivities. How the curves were calibrated or
//! stored is not visible here.

use accrual_core::Currency;

use crate::error::CurveResult;
use crate::index::RateIndex;

/// Read-only access to discounting and forward curves.
///
/// Implementations must be safe to share across threads; pricing calls only
/// ever read from a provider.
///
/// # Example
///
/// ```rust
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{CurveProvider, CurveResult, MulticurveProvider, YieldCurve};
///
/// fn zero_coupon_pv(
///     curves: &dyn CurveProvider,
///     ccy: Currency,
///     t: f64,
///     amount: f64,
/// ) -> CurveResult<f64> {
///     Ok(amount * curves.discount_factor(ccy, t)?)
/// }
///
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(YieldCurve::flat("USD-OIS", 0.04).unwrap())
///     .discounting(Currency::USD, "USD-OIS")
///     .build()
///     .unwrap();
///
/// let pv = zero_coupon_pv(&curves, Currency::USD, 2.0, 100.0).unwrap();
/// assert!((pv - 100.0 * (-0.08_f64).exp()).abs() < 1e-10);
/// assert!(zero_coupon_pv(&curves, Currency::EUR, 2.0, 100.0).is_err());
/// ```
pub trait CurveProvider: Send + Sync {
    /// Returns the discount factor for `currency` at time `t` (years from valuation).
    ///
    /// For a well-formed curve this is positive and decreasing in `t`.
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64>;

    /// Returns the name of the curve used to discount cash flows in `currency`.
    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str>;

    /// Returns the name of the curve used to project `index`.
    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str>;

    /// Returns the simply-compounded forward rate of `index` between `start`
    /// and `end`, accruing over `accrual_factor`.
    ///
    /// `F = (P(start) / P(end) - 1) / accrual_factor` on the index's forward curve.
    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64>;
}

impl<T: CurveProvider + ?Sized> CurveProvider for &T {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(currency, t)
    }

    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str> {
        (**self).discount_curve_name(currency)
    }

    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str> {
        (**self).forward_curve_name(index)
    }

    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        (**self).forward_rate(index, start, end, accrual_factor)
    }
}

impl<T: CurveProvider + ?Sized> CurveProvider for std::sync::Arc<T> {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        (**self).discount_factor(currency, t)
    }

    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str> {
        (**self).discount_curve_name(currency)
    }

    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str> {
        (**self).forward_curve_name(index)
    }

    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        (**self).forward_rate(index, start, end, accrual_factor)
    }
}
