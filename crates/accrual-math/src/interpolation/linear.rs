//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Linear interpolation between data points.
///
/// Outside the data range the interpolator extrapolates flat (the first or
/// last value) when extrapolation is enabled.
///
/// # Example
///
/// ```rust
/// use accrual_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap();
/// let y = interp.interpolate(1.5).unwrap();
/// assert!((y - 2.5).abs() < 1e-12);
///
/// let weights = interp.node_weights(1.5).unwrap();
/// assert_eq!(weights, vec![0.0, 0.5, 0.5, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if the xs are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Enables flat extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the node x values.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns the node y values.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        let last = self.xs.len() - 2;
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(last),
            Err(i) => i.saturating_sub(1).min(last),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let n = self.xs.len();
        if x <= self.xs[0] {
            return Ok(self.ys[0]);
        }
        if x >= self.xs[n - 1] {
            return Ok(self.ys[n - 1]);
        }

        let i = self.find_segment(x);
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + t * (self.ys[i + 1] - self.ys[i]))
    }

    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>> {
        self.check_range(x)?;

        let n = self.xs.len();
        let mut weights = vec![0.0; n];
        if x <= self.xs[0] {
            weights[0] = 1.0;
        } else if x >= self.xs[n - 1] {
            weights[n - 1] = 1.0;
        } else {
            let i = self.find_segment(x);
            let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
            weights[i] = 1.0 - t;
            weights[i + 1] = t;
        }
        Ok(weights)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_linear_interpolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 3.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 2.5);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 3.0);
    }

    #[test]
    fn test_extrapolation_disallowed() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.01, 0.02]).unwrap();
        assert!(matches!(
            interp.interpolate(3.0),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        assert!(interp.node_weights(0.5).is_err());
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.01, 0.02])
            .unwrap()
            .with_extrapolation();

        assert_relative_eq!(interp.interpolate(0.25).unwrap(), 0.01);
        assert_relative_eq!(interp.interpolate(5.0).unwrap(), 0.02);
        assert_eq!(interp.node_weights(0.25).unwrap(), vec![1.0, 0.0]);
        assert_eq!(interp.node_weights(5.0).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(LinearInterpolator::new(vec![1.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![2.0, 1.0], vec![1.0, 1.0]).is_err());
    }

    proptest! {
        #[test]
        fn prop_weights_reproduce_value(x in 0.0f64..10.0) {
            let xs = vec![0.0, 0.5, 1.0, 2.0, 5.0, 10.0];
            let ys = vec![0.010, 0.012, 0.015, 0.018, 0.021, 0.025];
            let interp = LinearInterpolator::new(xs, ys.clone()).unwrap();

            let weights = interp.node_weights(x).unwrap();
            let from_weights: f64 = weights.iter().zip(&ys).map(|(w, y)| w * y).sum();
            let total: f64 = weights.iter().sum();

            prop_assert!((from_weights - interp.interpolate(x).unwrap()).abs() < 1e-14);
            prop_assert!((total - 1.0).abs() < 1e-14);
        }
    }
}
