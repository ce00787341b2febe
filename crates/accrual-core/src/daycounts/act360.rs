//! Actual/360.

use super::DayCount;
use crate::types::Date;

/// Actual days over a 360-day year.
///
/// Accrual basis of SOFR, €STR and EURIBOR coupons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 360.0
    }
}
