//! Interpolated zero-rate curve.

use std::sync::Arc;

use accrual_math::interpolation::{Interpolator, LinearInterpolator};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A named curve of continuously-compounded zero rates at node times.
///
/// Zero rates are interpolated linearly in time and extrapolated flat. The
/// discount factor at `t` is `exp(-z(t) * t)`. The node zero rates are the
/// curve parameters that sensitivities are projected onto.
///
/// # Example
///
/// ```rust
/// use accrual_curves::YieldCurve;
///
/// let curve = YieldCurve::new("USD-SOFR", vec![0.5, 1.0, 2.0], vec![0.040, 0.042, 0.045]).unwrap();
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.042_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct YieldCurve {
    name: String,
    interpolator: Arc<LinearInterpolator>,
}

impl YieldCurve {
    /// Creates a curve from node times (years) and zero rates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Times and rates have different lengths
    /// - Fewer than 2 points are provided
    /// - Times are not strictly increasing or any value is not finite
    pub fn new(name: impl Into<String>, times: Vec<f64>, zero_rates: Vec<f64>) -> CurveResult<Self> {
        if times.len() != zero_rates.len() {
            return Err(CurveError::builder_error(format!(
                "Times ({}) and rates ({}) must have same length",
                times.len(),
                zero_rates.len()
            )));
        }

        if times.len() < 2 {
            return Err(CurveError::insufficient_points(2, times.len()));
        }

        for i in 1..times.len() {
            if times[i] <= times[i - 1] {
                return Err(CurveError::non_monotonic_times(i, times[i - 1], times[i]));
            }
        }

        if let Some(bad) = times.iter().chain(&zero_rates).find(|v| !v.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "curve nodes must be finite, got {bad}"
            )));
        }

        let interpolator = LinearInterpolator::new(times, zero_rates)?.with_extrapolation();

        Ok(Self {
            name: name.into(),
            interpolator: Arc::new(interpolator),
        })
    }

    /// Creates a flat curve at a single zero rate.
    pub fn flat(name: impl Into<String>, zero_rate: f64) -> CurveResult<Self> {
        Self::new(name, vec![0.0, 50.0], vec![zero_rate, zero_rate])
    }

    /// Returns the curve name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node times.
    #[must_use]
    pub fn node_times(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Returns the node zero rates.
    #[must_use]
    pub fn node_rates(&self) -> &[f64] {
        self.interpolator.ys()
    }

    /// Number of curve parameters (nodes).
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.node_times().len()
    }

    /// Returns the continuously-compounded zero rate at `t`.
    pub fn zero_rate(&self, t: f64) -> CurveResult<f64> {
        Ok(self.interpolator.interpolate(t)?)
    }

    /// Returns the discount factor at `t`.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let z = self.zero_rate(t)?;
        Ok((-z * t).exp())
    }

    /// Returns `d z(t) / d z_j` for each node `j`.
    pub fn zero_rate_node_weights(&self, t: f64) -> CurveResult<Vec<f64>> {
        Ok(self.interpolator.node_weights(t)?)
    }

    /// Returns a copy of the curve with every node rate shifted by `shift`.
    pub fn with_parallel_shift(&self, shift: f64) -> CurveResult<Self> {
        let rates = self.node_rates().iter().map(|z| z + shift).collect();
        Self::new(self.name.clone(), self.node_times().to_vec(), rates)
    }

    /// Returns a copy of the curve with the rate at node `node` shifted by `shift`.
    pub fn with_node_shift(&self, node: usize, shift: f64) -> CurveResult<Self> {
        if node >= self.parameter_count() {
            return Err(CurveError::invalid_value(format!(
                "node {node} out of range for curve {} with {} nodes",
                self.name,
                self.parameter_count()
            )));
        }
        let mut rates = self.node_rates().to_vec();
        rates[node] += shift;
        Self::new(self.name.clone(), self.node_times().to_vec(), rates)
    }
}

/// Serializable node definition of a [`YieldCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDefinition {
    /// Curve name.
    pub name: String,
    /// Node times in years.
    pub times: Vec<f64>,
    /// Continuously-compounded zero rates at the node times.
    pub zero_rates: Vec<f64>,
}

impl CurveDefinition {
    /// Builds the curve.
    pub fn build(&self) -> CurveResult<YieldCurve> {
        YieldCurve::new(self.name.clone(), self.times.clone(), self.zero_rates.clone())
    }
}

impl From<&YieldCurve> for CurveDefinition {
    fn from(curve: &YieldCurve) -> Self {
        Self {
            name: curve.name().to_string(),
            times: curve.node_times().to_vec(),
            zero_rates: curve.node_rates().to_vec(),
        }
    }
}
