//! Interpolation methods for curve construction.
//!
//! Curves in this library interpolate continuously-compounded zero rates.
//! Beyond the value at a point, sensitivity projection needs to know how a
//! bump at each node moves the interpolated value; [`Interpolator::node_weights`]
//! reports exactly that (the partial derivatives of the interpolated value
//! with respect to each node value).

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// A one-dimensional interpolation scheme over fixed nodes.
pub trait Interpolator: Send + Sync {
    /// Interpolated value at `x`.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns `d value(x) / d y_i` for every node `i`.
    fn node_weights(&self, x: f64) -> MathResult<Vec<f64>>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
