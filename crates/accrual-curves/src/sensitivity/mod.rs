//! Curve sensitivities.
//!
//! - [`MulticurveSensitivity`]: point sensitivities produced by the pricing
//!   methods, keyed by curve name
//! - [`ParameterSensitivityCalculator`]: projection onto curve nodes

mod parameter;
mod point;

pub use parameter::{ParameterSensitivity, ParameterSensitivityCalculator};
pub use point::{ForwardSensitivity, MultiCurrencyMulticurveSensitivity, MulticurveSensitivity};
