//! Curve implementations.

mod yield_curve;

pub use yield_curve::{CurveDefinition, YieldCurve};
