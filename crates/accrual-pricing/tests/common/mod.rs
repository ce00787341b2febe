//! Shared fixtures for the pricing integration tests.

#![allow(dead_code)]

use accrual_core::Currency;
use accrual_curves::{CurveError, CurveProvider, CurveResult, RateIndex};

/// Installs a test-writer subscriber honouring `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A single-currency provider reading discount factors from an explicit table.
///
/// Only the listed times can be queried; anything else is an error, so a
/// test fails loudly if a method reads a point it should not.
#[derive(Debug, Clone)]
pub struct TableProvider {
    currency: Currency,
    curve_name: String,
    index: RateIndex,
    points: Vec<(f64, f64)>,
}

impl TableProvider {
    pub fn new(currency: Currency, index: RateIndex, points: &[(f64, f64)]) -> Self {
        Self {
            currency,
            curve_name: format!("{currency}-TABLE"),
            index,
            points: points.to_vec(),
        }
    }

    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    fn lookup(&self, t: f64) -> CurveResult<f64> {
        self.points
            .iter()
            .find(|(time, _)| (time - t).abs() < 1e-12)
            .map(|&(_, df)| df)
            .ok_or_else(|| CurveError::invalid_value(format!("no discount factor at t={t}")))
    }
}

impl CurveProvider for TableProvider {
    fn discount_factor(&self, currency: Currency, t: f64) -> CurveResult<f64> {
        if currency != self.currency {
            return Err(CurveError::no_discount_curve(currency));
        }
        self.lookup(t)
    }

    fn discount_curve_name(&self, currency: Currency) -> CurveResult<&str> {
        if currency != self.currency {
            return Err(CurveError::no_discount_curve(currency));
        }
        Ok(&self.curve_name)
    }

    fn forward_curve_name(&self, index: &RateIndex) -> CurveResult<&str> {
        if *index != self.index {
            return Err(CurveError::no_forward_curve(index.name()));
        }
        Ok(&self.curve_name)
    }

    fn forward_rate(
        &self,
        index: &RateIndex,
        start: f64,
        end: f64,
        accrual_factor: f64,
    ) -> CurveResult<f64> {
        self.forward_curve_name(index)?;
        Ok((self.lookup(start)? / self.lookup(end)? - 1.0) / accrual_factor)
    }
}

/// Relative distance between two numbers, safe at zero.
pub fn relative_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs()).max(1e-300)
}
