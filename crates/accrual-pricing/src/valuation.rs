//! Valuation requests assembled incrementally.
//!
//! Callers that collect their inputs from several places (a trade store, a
//! market data service) attach them to a [`Valuation`] one at a time. Running
//! the request before both a coupon and a curve provider are attached fails
//! with `PricingError::NullArgument`.

use accrual_core::MultiCurrencyAmount;
use accrual_curves::{CurveProvider, MultiCurrencyMulticurveSensitivity};

use crate::calculators::{
    PresentValueCurveSensitivityDiscountingCalculator, PresentValueDiscountingCalculator,
};
use crate::error::{PricingError, PricingResult};
use crate::instruments::Coupon;

/// A present value or sensitivity request for one coupon.
///
/// # Example
///
/// ```rust
/// use accrual_core::{Currency, Date};
/// use accrual_curves::{MulticurveProvider, YieldCurve};
/// use accrual_pricing::instruments::{Coupon, FixedPayment};
/// use accrual_pricing::{PricingError, Valuation};
///
/// let curves = MulticurveProvider::builder(Date::from_ymd(2025, 1, 2).unwrap())
///     .curve(YieldCurve::flat("USD-OIS", 0.04).unwrap())
///     .discounting(Currency::USD, "USD-OIS")
///     .build()
///     .unwrap();
/// let coupon = Coupon::from(FixedPayment::new(Currency::USD, 1.0, 100.0));
///
/// let missing = Valuation::new().coupon(&coupon).present_value();
/// assert!(matches!(missing, Err(PricingError::NullArgument { .. })));
///
/// let pv = Valuation::new().coupon(&coupon).curves(&curves).present_value().unwrap();
/// assert!(pv.amount(Currency::USD) < 100.0);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Valuation<'a> {
    coupon: Option<&'a Coupon>,
    curves: Option<&'a dyn CurveProvider>,
}

impl<'a> Valuation<'a> {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the coupon.
    #[must_use]
    pub fn coupon(mut self, coupon: &'a Coupon) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Attaches the curve provider.
    #[must_use]
    pub fn curves(mut self, curves: &'a dyn CurveProvider) -> Self {
        self.curves = Some(curves);
        self
    }

    fn inputs(&self) -> PricingResult<(&'a Coupon, &'a dyn CurveProvider)> {
        let coupon = self.coupon.ok_or_else(|| PricingError::null_argument("Coupon"))?;
        let curves = self
            .curves
            .ok_or_else(|| PricingError::null_argument("Curve provider"))?;
        Ok((coupon, curves))
    }

    /// Present value of the coupon.
    pub fn present_value(&self) -> PricingResult<MultiCurrencyAmount> {
        let (coupon, curves) = self.inputs()?;
        PresentValueDiscountingCalculator.coupon(coupon, curves)
    }

    /// Point curve sensitivity of the coupon.
    pub fn curve_sensitivity(&self) -> PricingResult<MultiCurrencyMulticurveSensitivity> {
        let (coupon, curves) = self.inputs()?;
        PresentValueCurveSensitivityDiscountingCalculator.coupon(coupon, curves)
    }
}

impl std::fmt::Debug for Valuation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Valuation")
            .field("coupon", &self.coupon)
            .field("has_curves", &self.curves.is_some())
            .finish()
    }
}
